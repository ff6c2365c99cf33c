//! Fixed bot notices shown in the transcript.

pub const CANNOT_REACH_SERVER: &str = "⚠️ Cannot reach server";
pub const CANNOT_UPLOAD_FILE: &str = "⚠️ Cannot upload file";

pub fn uploading(file_name: &str) -> String {
    format!("📂 Uploading {file_name}...")
}

pub fn uploaded(chunks_inserted: u64) -> String {
    format!("✅ File uploaded successfully! ({chunks_inserted} chunks)")
}
