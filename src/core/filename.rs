/// Characters that are not allowed in file names on common filesystems.
pub const ILLEGAL_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// `.flac` when the audio URL mentions flac in any letter case, `.mp3` otherwise.
pub fn infer_extension(audio_url: &str) -> &'static str {
    if audio_url.to_lowercase().contains("flac") {
        ".flac"
    } else {
        ".mp3"
    }
}

/// Drops every illegal character; nothing is substituted in its place.
pub fn sanitize_filename(file_name: &str) -> String {
    file_name
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .collect()
}

/// Builds `"{performer} - {title}{ext}"` and sanitizes it.
///
/// Empty performer or title are not special-cased, so the separator is
/// always present (e.g. `" - Title.mp3"`).
pub fn derive_filename(performer: &str, title: &str, audio_url: &str) -> String {
    let file_name = format!("{} - {}{}", performer, title, infer_extension(audio_url));
    sanitize_filename(&file_name)
}
