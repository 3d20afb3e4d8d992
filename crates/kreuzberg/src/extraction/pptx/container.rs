//! ZIP container access and per-slide iteration over a PPTX package.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};

use zip::ZipArchive;

use super::elements::Slide;
use super::image_handling::get_full_image_path;
use super::parser::parse_presentation_rels;
use crate::error::{KreuzbergError, Result};

pub(super) struct PptxContainer<R: Read + Seek> {
    pub(super) archive: ZipArchive<R>,
    slide_paths: Vec<String>,
}

impl PptxContainer<File> {
    pub(super) fn open(path: &str) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl PptxContainer<Cursor<Vec<u8>>> {
    pub(super) fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(data.to_vec()))
    }
}

impl<R: Read + Seek> PptxContainer<R> {
    fn from_reader(reader: R) -> Result<Self> {
        let mut archive = match ZipArchive::new(reader) {
            Ok(archive) => archive,
            Err(zip::result::ZipError::Io(io_err)) => return Err(io_err.into()),
            Err(e) => {
                return Err(KreuzbergError::parsing(format!(
                    "Failed to read PPTX archive (invalid format): {}",
                    e
                )));
            }
        };

        let slide_paths = Self::find_slide_paths(&mut archive)?;

        Ok(Self { archive, slide_paths })
    }

    pub(super) fn slide_paths(&self) -> &[String] {
        &self.slide_paths
    }

    pub(super) fn read_file(&mut self, path: &str) -> Result<Vec<u8>> {
        match self.archive.by_name(path) {
            Ok(mut file) => {
                let mut contents = Vec::new();
                file.read_to_end(&mut contents)?;
                Ok(contents)
            }
            Err(zip::result::ZipError::FileNotFound) => {
                Err(KreuzbergError::parsing(format!("File not found in archive: {}", path)))
            }
            Err(zip::result::ZipError::Io(io_err)) => Err(io_err.into()),
            Err(e) => Err(KreuzbergError::parsing(format!("Zip error: {}", e))),
        }
    }

    fn find_slide_paths(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        if let Ok(mut rels_file) = archive.by_name("ppt/_rels/presentation.xml.rels") {
            let mut rels_data = Vec::new();
            if rels_file.read_to_end(&mut rels_data).is_ok() {
                drop(rels_file);
                if let Ok(paths) = parse_presentation_rels(&rels_data)
                    && !paths.is_empty()
                {
                    return Ok(paths);
                }
            }
        }

        let mut slide_paths = Vec::new();
        for i in 0..archive.len() {
            if let Ok(file) = archive.by_index(i) {
                let name = file.name();
                if name.starts_with("ppt/slides/slide") && name.ends_with(".xml") {
                    slide_paths.push(name.to_string());
                }
            }
        }
        slide_paths.sort();
        Ok(slide_paths)
    }
}

pub(super) struct SlideIterator<R: Read + Seek> {
    container: PptxContainer<R>,
    current_index: usize,
    total_slides: usize,
}

impl<R: Read + Seek> SlideIterator<R> {
    pub(super) fn new(container: PptxContainer<R>) -> Self {
        let total_slides = container.slide_paths().len();
        Self {
            container,
            current_index: 0,
            total_slides,
        }
    }

    pub(super) fn slide_count(&self) -> usize {
        self.total_slides
    }

    pub(super) fn next_slide(&mut self) -> Result<Option<Slide>> {
        if self.current_index >= self.total_slides {
            return Ok(None);
        }

        let slide_path = self.container.slide_paths()[self.current_index].clone();
        let slide_number = (self.current_index + 1) as u32;

        let xml_data = self.container.read_file(&slide_path)?;

        let rels_path = super::image_handling::get_slide_rels_path(&slide_path);
        let rels_data = self.container.read_file(&rels_path).ok();

        let slide = Slide::from_xml(slide_number, &xml_data, rels_data.as_deref())?;

        self.current_index += 1;

        Ok(Some(slide))
    }

    pub(super) fn get_slide_images(&mut self, slide: &Slide) -> Result<HashMap<String, Vec<u8>>> {
        let mut image_data = HashMap::new();

        let slide_path = self.container.slide_paths()[slide.slide_number as usize - 1].clone();

        for img_ref in &slide.images {
            let full_path = get_full_image_path(&slide_path, &img_ref.target);
            if let Ok(data) = self.container.read_file(&full_path) {
                image_data.insert(img_ref.id.clone(), data);
            }
        }

        Ok(image_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_pptx(slide_texts: &[&str]) -> Vec<u8> {
        use std::io::Write;
        use zip::write::{SimpleFileOptions, ZipWriter};

        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();

            zip.start_file("ppt/presentation.xml", options).unwrap();
            zip.write_all(b"<?xml version=\"1.0\"?><presentation/>").unwrap();

            for (i, text) in slide_texts.iter().enumerate() {
                let slide_xml = format!(
                    r#"<?xml version="1.0"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
       xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld>
</p:sld>"#,
                    text
                );
                zip.start_file(format!("ppt/slides/slide{}.xml", i + 1), options).unwrap();
                zip.write_all(slide_xml.as_bytes()).unwrap();
            }

            zip.finish().unwrap();
        }
        buffer
    }

    #[test]
    fn test_from_bytes_finds_slides_by_listing() {
        let data = minimal_pptx(&["Alpha", "Beta"]);
        let container = PptxContainer::from_bytes(&data).unwrap();
        assert_eq!(container.slide_paths(), &["ppt/slides/slide1.xml", "ppt/slides/slide2.xml"]);
    }

    #[test]
    fn test_invalid_archive_errors() {
        assert!(PptxContainer::from_bytes(b"not a zip").is_err());
    }

    #[test]
    fn test_slide_iterator_reads_text() {
        let data = minimal_pptx(&["Hello"]);
        let container = PptxContainer::from_bytes(&data).unwrap();
        let mut iter = SlideIterator::new(container);
        assert_eq!(iter.slide_count(), 1);
        let slide = iter.next_slide().unwrap().unwrap();
        assert_eq!(slide.slide_number, 1);
        assert!(iter.next_slide().unwrap().is_none());
    }
}
