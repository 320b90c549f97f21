// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — assemble raster pages into a PDF with `lopdf`.
//
// Baseline JPEG pages are embedded as-is behind a `/DCTDecode` filter, so a
// page is never decoded, resampled, or compressed a second time. Any other
// raster format is decoded to RGB and stored Flate-compressed at full size.
// Pages are built one at a time; only the encoded page data stays resident.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ::image::ImageReader;
use bildband_core::error::{BildbandError, Result};
use bildband_core::traits::PdfAssembler;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tracing::{debug, info, instrument};

const PDF_VERSION: &str = "1.5";

/// Resource name of the single image drawn on every page.
const PAGE_IMAGE: &str = "Im0";

/// Builds image-per-page PDF documents.
///
/// Each page measures exactly its image in points (one pixel, one point) and
/// shows it at the origin. The writer never rescales or re-centres.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Create a PDF with one page per image file, in the given order.
    #[instrument(skip_all, fields(pages = paths.len()))]
    pub fn create_from_image_files(&self, paths: &[PathBuf]) -> Result<Vec<u8>> {
        if paths.is_empty() {
            return Err(BildbandError::Assembly("no pages to assemble".into()));
        }
        info!(pages = paths.len(), "Creating image PDF");

        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();
        let mut kids: Vec<Object> = Vec::with_capacity(paths.len());

        for path in paths {
            let page = PageImage::load(path)?;
            let (width, height) = (i64::from(page.width), i64::from(page.height));
            debug!(width, height, jpeg = page.is_jpeg(), "Page added");

            let image_id = doc.add_object(page.into_stream()?);
            let content = Content {
                operations: vec![
                    Operation::new("q", vec![]),
                    Operation::new(
                        "cm",
                        vec![
                            width.into(),
                            0.into(),
                            0.into(),
                            height.into(),
                            0.into(),
                            0.into(),
                        ],
                    ),
                    Operation::new("Do", vec![Object::Name(PAGE_IMAGE.as_bytes().to_vec())]),
                    Operation::new("Q", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().map_err(assembly_err)?,
            ));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "XObject" => dictionary! { PAGE_IMAGE => image_id },
                },
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut output = Vec::new();
        doc.save_to(&mut output).map_err(assembly_err)?;
        Ok(output)
    }
}

impl PdfAssembler for PdfWriter {
    fn assemble(&self, pages: &[PathBuf]) -> Result<Vec<u8>> {
        self.create_from_image_files(pages)
    }
}

fn assembly_err<E: fmt::Display>(err: E) -> BildbandError {
    BildbandError::Assembly(format!("PDF serialisation failed: {err}"))
}

/// Encoded pixels of one page, ready to become an image XObject.
struct PageImage {
    width: u32,
    height: u32,
    color_space: &'static str,
    data: PageData,
}

enum PageData {
    /// A complete JPEG file, embedded unchanged.
    Jpeg(Vec<u8>),
    /// Uncompressed 8-bit samples, compressed on embedding.
    Raw(Vec<u8>),
}

impl PageImage {
    fn load(path: &Path) -> Result<Self> {
        let unreadable = |reason: String| {
            BildbandError::Assembly(format!("cannot read page {}: {reason}", path.display()))
        };

        let bytes = fs::read(path).map_err(|err| unreadable(err.to_string()))?;
        if let Some(header) = JpegHeader::parse(&bytes) {
            if let Some(color_space) = header.embeddable_color_space() {
                return Ok(Self {
                    width: header.width,
                    height: header.height,
                    color_space,
                    data: PageData::Jpeg(bytes),
                });
            }
        }
        drop(bytes);

        let mut reader = ImageReader::open(path)
            .map_err(|err| unreadable(err.to_string()))?
            .with_guessed_format()
            .map_err(|err| unreadable(err.to_string()))?;
        reader.no_limits();
        let rgb = reader
            .decode()
            .map_err(|err| unreadable(err.to_string()))?
            .into_rgb8();

        Ok(Self {
            width: rgb.width(),
            height: rgb.height(),
            color_space: "DeviceRGB",
            data: PageData::Raw(rgb.into_raw()),
        })
    }

    fn is_jpeg(&self) -> bool {
        matches!(self.data, PageData::Jpeg(_))
    }

    fn into_stream(self) -> Result<Stream> {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(self.width),
            "Height" => i64::from(self.height),
            "ColorSpace" => self.color_space,
            "BitsPerComponent" => 8,
        };

        match self.data {
            PageData::Jpeg(bytes) => {
                dict.set("Filter", "DCTDecode");
                Ok(Stream::new(dict, bytes).with_compression(false))
            }
            PageData::Raw(samples) => {
                let mut stream = Stream::new(dict, samples);
                stream.compress().map_err(assembly_err)?;
                Ok(stream)
            }
        }
    }
}

/// Frame header of a JPEG file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct JpegHeader {
    precision: u8,
    width: u32,
    height: u32,
    components: u8,
}

impl JpegHeader {
    /// Walk the marker segments up to the first start-of-frame. Returns
    /// `None` for anything that is not a well-formed JPEG.
    fn parse(data: &[u8]) -> Option<Self> {
        if !data.starts_with(&[0xFF, 0xD8]) {
            return None;
        }

        let mut pos = 2;
        while pos + 4 <= data.len() {
            if data[pos] != 0xFF {
                return None;
            }
            let marker = data[pos + 1];
            match marker {
                // Fill byte.
                0xFF => {
                    pos += 1;
                    continue;
                }
                // Standalone markers carry no length.
                0x01 | 0xD0..=0xD7 => {
                    pos += 2;
                    continue;
                }
                // Scan data before any frame header.
                0xD9 | 0xDA => return None,
                _ => {}
            }

            let length = usize::from(u16::from_be_bytes([data[pos + 2], data[pos + 3]]));
            if length < 2 {
                return None;
            }
            let is_frame = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
            if is_frame {
                let segment = data.get(pos + 4..pos + 2 + length)?;
                let &[precision, h0, h1, w0, w1, components, ..] = segment else {
                    return None;
                };
                return Some(Self {
                    precision,
                    width: u32::from(u16::from_be_bytes([w0, w1])),
                    height: u32::from(u16::from_be_bytes([h0, h1])),
                    components,
                });
            }
            pos += 2 + length;
        }
        None
    }

    /// Colour space for embedding the file unchanged, or `None` when the
    /// page has to be decoded first (CMYK, 12-bit, deferred height).
    fn embeddable_color_space(&self) -> Option<&'static str> {
        if self.precision != 8 || self.width == 0 || self.height == 0 {
            return None;
        }
        match self.components {
            1 => Some("DeviceGray"),
            3 => Some("DeviceRGB"),
            _ => None,
        }
    }
}
