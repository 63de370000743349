//! Decompression of legacy compressed artifacts.

use std::io::{self, Read};

use bzip2::read::BzDecoder;
use thiserror::Error;

use crate::consts::BZIP2_METHOD;

#[derive(Debug, Error)]
pub enum DecompressError {
  #[error("unknown compression method '{0}'")]
  UnknownMethod(String),

  #[error("failed to decompress {method} data: {source}")]
  Corrupt {
    method: String,
    #[source]
    source: io::Error,
  },
}

pub trait Decompressor: Send + Sync {
  fn decompress(&self, method: &str, data: &[u8]) -> Result<Vec<u8>, DecompressError>;
}

/// Handles `bzip2`, plus `none` as the identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bzip2Decompressor;

impl Decompressor for Bzip2Decompressor {
  fn decompress(&self, method: &str, data: &[u8]) -> Result<Vec<u8>, DecompressError> {
    match method {
      "none" => Ok(data.to_vec()),
      BZIP2_METHOD => {
        let mut out = Vec::new();
        BzDecoder::new(data)
          .read_to_end(&mut out)
          .map_err(|source| DecompressError::Corrupt {
            method: method.to_string(),
            source,
          })?;
        Ok(out)
      }
      other => Err(DecompressError::UnknownMethod(other.to_string())),
    }
  }
}

#[cfg(test)]
pub(crate) fn bzip2_bytes(data: &[u8]) -> Vec<u8> {
  use bzip2::Compression;
  use bzip2::write::BzEncoder;
  use std::io::Write;

  let mut encoder = BzEncoder::new(Vec::new(), Compression::default());
  encoder.write_all(data).unwrap();
  encoder.finish().unwrap()
}
