//! Human-readable rendering of sizes, speeds and durations, plus MIME
//! classification for the file list.

use serde::Serialize;

const KILO: f64 = 1024.0;
const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const SPEED_UNITS: [&str; 4] = ["B/s", "KB/s", "MB/s", "GB/s"];

pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = (((bytes as f64).ln() / KILO.ln()).floor() as usize).min(SIZE_UNITS.len() - 1);
    let value = bytes as f64 / KILO.powi(exponent as i32);
    format!("{} {}", trim_zeros(format!("{value:.2}")), SIZE_UNITS[exponent])
}

pub fn calculate_upload_speed(bytes_uploaded: u64, seconds_elapsed: f64) -> f64 {
    if seconds_elapsed == 0.0 {
        return 0.0;
    }
    bytes_uploaded as f64 / seconds_elapsed
}

pub fn format_upload_speed(bytes_per_second: f64) -> String {
    if bytes_per_second <= 0.0 {
        return "0 B/s".to_string();
    }
    let exponent =
        ((bytes_per_second.ln() / KILO.ln()).floor().max(0.0) as usize).min(SPEED_UNITS.len() - 1);
    let value = bytes_per_second / KILO.powi(exponent as i32);
    format!("{} {}", trim_zeros(format!("{value:.1}")), SPEED_UNITS[exponent])
}

pub fn estimated_seconds_remaining(
    total_bytes: u64,
    uploaded_bytes: u64,
    bytes_per_second: f64,
) -> u64 {
    if bytes_per_second <= 0.0 || uploaded_bytes >= total_bytes {
        return 0;
    }
    ((total_bytes - uploaded_bytes) as f64 / bytes_per_second).ceil() as u64
}

pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    }
}

fn trim_zeros(formatted: String) -> String {
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// Coarse classification of a MIME type, used by clients to pick a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Document,
    Spreadsheet,
    Presentation,
    Archive,
    Text,
    Other,
}

impl FileKind {
    pub fn from_mime(mime_type: &str) -> Self {
        let mime_type = mime_type.to_lowercase();
        if mime_type.contains("image") {
            FileKind::Image
        } else if mime_type.contains("video") {
            FileKind::Video
        } else if mime_type.contains("audio") {
            FileKind::Audio
        } else if mime_type.contains("pdf") || mime_type.contains("word") || mime_type.contains("doc") {
            FileKind::Document
        } else if mime_type.contains("excel") || mime_type.contains("sheet") {
            FileKind::Spreadsheet
        } else if mime_type.contains("powerpoint") || mime_type.contains("presentation") {
            FileKind::Presentation
        } else if mime_type.contains("zip")
            || mime_type.contains("rar")
            || mime_type.contains("archive")
        {
            FileKind::Archive
        } else if mime_type.contains("text") || mime_type.contains("plain") {
            FileKind::Text
        } else {
            FileKind::Other
        }
    }
}
