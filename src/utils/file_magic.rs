const OLE_HEADER: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const ZIP_HEADER: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const EBML_HEADER: [u8; 4] = [0x1A, 0x45, 0xDF, 0xA3];

/// 校验文件头是否与扩展名（不含点号）一致
///
/// 只接受上传会用到的格式，未知扩展名一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_ascii_lowercase().as_str() {
        "pdf" => data.starts_with(b"%PDF"),
        // 旧版 Office（OLE 复合文档）
        "doc" | "ppt" | "xls" => data.starts_with(&OLE_HEADER),
        // OOXML 是 zip 包
        "docx" | "pptx" | "xlsx" => data.starts_with(&ZIP_HEADER),
        // ISO BMFF：第 4 字节起为 "ftyp"
        "mp4" | "mov" => data.len() >= 8 && &data[4..8] == b"ftyp",
        "webm" | "mkv" => data.starts_with(&EBML_HEADER),
        // 纯文本名单不校验
        "csv" => true,
        _ => false,
    }
}

/// 取文件名扩展名（小写，不含点号）
pub fn file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents() {
        assert!(validate_magic_bytes(b"%PDF-1.7\n", "pdf"));
        assert!(!validate_magic_bytes(b"<html>", "pdf"));
        assert!(validate_magic_bytes(&OLE_HEADER, "PPT"));
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14, 0x00], "docx"));
        assert!(!validate_magic_bytes(&OLE_HEADER, "docx"));
    }

    #[test]
    fn test_videos() {
        let mp4 = [0x00, 0x00, 0x00, 0x20, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
        assert!(validate_magic_bytes(&mp4, "mp4"));
        assert!(!validate_magic_bytes(&mp4[..6], "mp4"));
        assert!(validate_magic_bytes(&[0x1A, 0x45, 0xDF, 0xA3, 0x01], "webm"));
    }

    #[test]
    fn test_unknown_and_empty_are_rejected() {
        assert!(!validate_magic_bytes(b"MZ", "exe"));
        assert!(!validate_magic_bytes(&[], "csv"));
        assert_eq!(file_extension("Deck.Final.PPTX").as_deref(), Some("pptx"));
        assert_eq!(file_extension("README"), None);
    }
}
