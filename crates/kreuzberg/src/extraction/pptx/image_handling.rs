//! Image format sniffing and OOXML relationship path helpers.

use std::borrow::Cow;

pub(super) fn detect_image_format(data: &[u8]) -> Cow<'static, str> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Cow::Borrowed("jpeg")
    } else if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        Cow::Borrowed("png")
    } else if data.starts_with(b"GIF") {
        Cow::Borrowed("gif")
    } else if data.starts_with(b"BM") {
        Cow::Borrowed("bmp")
    } else if data.starts_with(b"<svg") || data.starts_with(b"<?xml") {
        Cow::Borrowed("svg")
    } else if data.starts_with(b"II\x2A\x00") || data.starts_with(b"MM\x00\x2A") {
        Cow::Borrowed("tiff")
    } else {
        Cow::Borrowed("unknown")
    }
}

pub(super) fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

pub(super) fn get_slide_rels_path(slide_path: &str) -> String {
    let parts: Vec<&str> = slide_path.rsplitn(2, '/').collect();
    if parts.len() == 2 {
        format!("{}/_rels/{}.rels", parts[1], parts[0])
    } else {
        format!("_rels/{}.rels", slide_path)
    }
}

pub(super) fn get_full_image_path(slide_path: &str, image_target: &str) -> String {
    if let Some(rest) = image_target.strip_prefix("../") {
        let parts: Vec<&str> = slide_path.rsplitn(3, '/').collect();
        if parts.len() >= 3 {
            format!("{}/{}", parts[2], rest)
        } else {
            format!("ppt/{}", rest)
        }
    } else {
        let parts: Vec<&str> = slide_path.rsplitn(2, '/').collect();
        if parts.len() == 2 {
            format!("{}/{}", parts[1], image_target)
        } else {
            format!("ppt/slides/{}", image_target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_image_format_jpeg() {
        assert_eq!(detect_image_format(&[0xFF, 0xD8, 0xFF, 0xE0]), "jpeg");
    }

    #[test]
    fn test_detect_image_format_png() {
        assert_eq!(detect_image_format(&[0x89, 0x50, 0x4E, 0x47]), "png");
    }

    #[test]
    fn test_detect_image_format_gif() {
        assert_eq!(detect_image_format(b"GIF89a"), "gif");
    }

    #[test]
    fn test_detect_image_format_bmp() {
        assert_eq!(detect_image_format(b"BM"), "bmp");
    }

    #[test]
    fn test_detect_image_format_svg() {
        assert_eq!(detect_image_format(b"<svg xmlns=\"http://www.w3.org/2000/svg\">"), "svg");
    }

    #[test]
    fn test_detect_image_format_tiff_little_endian() {
        assert_eq!(detect_image_format(&[0x49, 0x49, 0x2A, 0x00]), "tiff");
    }

    #[test]
    fn test_detect_image_format_tiff_big_endian() {
        assert_eq!(detect_image_format(&[0x4D, 0x4D, 0x00, 0x2A]), "tiff");
    }

    #[test]
    fn test_detect_image_format_unknown() {
        assert_eq!(detect_image_format(b"unknown format"), "unknown");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("plain text"), "plain text");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("<tag>"), "&lt;tag&gt;");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("'apostrophe'"), "&#x27;apostrophe&#x27;");
    }

    #[test]
    fn test_get_slide_rels_path() {
        assert_eq!(get_slide_rels_path("ppt/slides/slide1.xml"), "ppt/slides/_rels/slide1.xml.rels");
        assert_eq!(get_slide_rels_path("ppt/slides/slide10.xml"), "ppt/slides/_rels/slide10.xml.rels");
    }

    #[test]
    fn test_get_full_image_path_relative() {
        assert_eq!(
            get_full_image_path("ppt/slides/slide1.xml", "../media/image1.png"),
            "ppt/media/image1.png"
        );
    }

    #[test]
    fn test_get_full_image_path_direct() {
        assert_eq!(
            get_full_image_path("ppt/slides/slide1.xml", "image1.png"),
            "ppt/slides/image1.png"
        );
    }
}
