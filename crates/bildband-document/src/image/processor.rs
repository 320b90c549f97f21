// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode, flatten to RGB, pad with white margins, encode.
// Operates on in-memory images using the `image` crate.

use std::io::{self, Write};
use std::path::Path;

use ::image::codecs::jpeg::JpegEncoder;
use ::image::{DynamicImage, ImageReader, Rgb, RgbImage, imageops};
use bildband_core::config::PixelMargins;
use bildband_core::error::{BildbandError, Result};
use tracing::{debug, info, instrument};

/// Fill colour of the margin canvas.
const MARGIN_FILL: Rgb<u8> = Rgb([255, 255, 255]);

/// Image processing pipeline operating on a single in-memory RGB image.
///
/// Each transformation consumes `self` and returns a new `ImageProcessor`,
/// enabling method chaining.
///
/// ```ignore
/// let mut out = Vec::new();
/// ImageProcessor::open("scan/page1.png")?
///     .apply_margin(&margins)?
///     .write_jpeg(&mut out, 90)?;
/// ```
pub struct ImageProcessor {
    /// The current working image, always plain 8-bit RGB.
    image: RgbImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path and flatten it to RGB.
    ///
    /// The format is sniffed from the file contents, so a PNG saved as `.jpg`
    /// still decodes. Decoder size limits are lifted: large scans are the
    /// normal case here.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let decode_err = |reason: String| BildbandError::ImageDecode {
            path: path.to_path_buf(),
            reason,
        };

        let mut reader = ImageReader::open(path)
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => BildbandError::NotFound(path.to_path_buf()),
                _ => decode_err(err.to_string()),
            })?
            .with_guessed_format()
            .map_err(|err| decode_err(err.to_string()))?;
        reader.no_limits();
        let img = reader.decode().map_err(|err| decode_err(err.to_string()))?;

        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self::from_dynamic(img))
    }

    /// Wrap an already-decoded image. Alpha and any colour profile are
    /// dropped.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgb8(),
        }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying RGB buffer.
    pub fn as_rgb(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_rgb(self) -> RgbImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Pad the image with a white border.
    ///
    /// The new canvas is `(width + left + right) x (height + top + bottom)`
    /// with the source pasted at `(left, top)`. All-zero margins return the
    /// image unchanged in size.
    #[instrument(skip(self), fields(width = self.image.width(), height = self.image.height()))]
    pub fn apply_margin(self, margins: &PixelMargins) -> Result<Self> {
        if margins.is_zero() {
            return Ok(self);
        }

        let (width, height) = self.image.dimensions();
        let canvas_w = width
            .checked_add(margins.left)
            .and_then(|w| w.checked_add(margins.right));
        let canvas_h = height
            .checked_add(margins.top)
            .and_then(|h| h.checked_add(margins.bottom));
        let (Some(canvas_w), Some(canvas_h)) = (canvas_w, canvas_h) else {
            return Err(BildbandError::ImageEncode(format!(
                "margined canvas for {width}x{height} image is too large"
            )));
        };

        let mut canvas = RgbImage::from_pixel(canvas_w, canvas_h, MARGIN_FILL);
        imageops::replace(
            &mut canvas,
            &self.image,
            i64::from(margins.left),
            i64::from(margins.top),
        );

        debug!(canvas_w, canvas_h, "Margin applied");
        Ok(Self { image: canvas })
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as JPEG into `writer` with the given quality
    /// (1-100).
    pub fn write_jpeg<W: Write + ?Sized>(&self, writer: &mut W, quality: u8) -> Result<()> {
        let encoder = JpegEncoder::new_with_quality(writer, quality);
        self.image
            .write_with_encoder(encoder)
            .map_err(|err| BildbandError::ImageEncode(format!("JPEG encoding failed: {err}")))
    }

    /// Encode the current image as JPEG bytes.
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_jpeg(&mut buffer, quality)?;
        Ok(buffer)
    }
}
