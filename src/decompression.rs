use anyhow::{anyhow, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Chain, Cursor, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 3] = [0x1F, 0x8B, 0x08];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression detected from the leading bytes of an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Zstd,
    Plain,
}

impl Compression {
    fn detect(head: &[u8]) -> Self {
        if head.starts_with(&GZIP_MAGIC) {
            Compression::Gzip
        } else if head.starts_with(&ZSTD_MAGIC) {
            Compression::Zstd
        } else {
            Compression::Plain
        }
    }
}

/// Wrap `reader` in a gzip or zstd decoder when its magic bytes say so.
///
/// The peeked bytes are put back in front with a cursor chain, so plain input
/// is passed through untouched.
pub fn maybe_decompress<R: Read + Send + 'static>(
    mut reader: R,
) -> std::io::Result<(Compression, Box<dyn Read + Send>)> {
    let mut head = [0u8; 4];
    let n = read_head(&mut reader, &mut head)?;

    let compression = Compression::detect(&head[..n]);
    let chained: Chain<Cursor<Vec<u8>>, R> = Cursor::new(head[..n].to_vec()).chain(reader);

    let decoded: Box<dyn Read + Send> = match compression {
        Compression::Gzip => Box::new(MultiGzDecoder::new(chained)),
        Compression::Zstd => Box::new(zstd::Decoder::new(chained)?),
        Compression::Plain => Box::new(chained),
    };
    Ok((compression, decoded))
}

/// Open a log file, transparently decompressing gzip and zstd content
pub fn open_log_file<P: AsRef<Path>>(path: P) -> Result<Box<dyn Read + Send>> {
    let path_ref = path.as_ref();

    if let Some(extension) = path_ref.extension().and_then(|ext| ext.to_str()) {
        if extension.eq_ignore_ascii_case("zip") {
            return Err(anyhow!(
                "ZIP archives are not supported, only gzip and zstd compressed logs are. Extract it first: unzip {}",
                path_ref.display()
            ));
        }
    }

    let file = File::open(path_ref)?;
    let (compression, reader) = maybe_decompress(BufReader::new(file))
        .map_err(|e| anyhow!("Failed to detect compression format: {}", e))?;

    tracing::debug!(path = %path_ref.display(), ?compression, "opened input file");
    Ok(reader)
}

/// Fill `head` as far as the input allows; short files yield fewer bytes
fn read_head<R: Read>(reader: &mut R, head: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < head.len() {
        match reader.read(&mut head[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
