use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

pub fn looks_like_gzip<R: Read + Seek>(mut r: R) -> io::Result<bool> {
    let mut magic = [0u8; 2];
    let pos = r.stream_position()?;
    let n = r.read(&mut magic)?;
    r.seek(SeekFrom::Start(pos))?;
    Ok(n >= 2 && magic == [0x1F, 0x8B])
}

pub fn has_gz_extension(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("gz")
}

/// Open `path` as a byte stream, transparently decompressing gzip.
pub fn open_file(path: &Path) -> io::Result<Box<dyn Read + Send>> {
    let f = File::open(path)?;
    let is_gz = has_gz_extension(path) || looks_like_gzip(&f).unwrap_or(false);
    log::debug!("opening {} (gzip: {is_gz})", path.display());

    if is_gz {
        #[cfg(feature = "gzip")]
        {
            use flate2::read::MultiGzDecoder;
            Ok(Box::new(MultiGzDecoder::new(f)))
        }
        #[cfg(not(feature = "gzip"))]
        {
            Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("{} is gzip-compressed but the `gzip` feature is disabled", path.display()),
            ))
        }
    } else {
        #[cfg(feature = "mmap")]
        {
            use memmap2::Mmap;
            use std::io::Cursor;
            // Safety: the map is read-only; the file must not be truncated while it is read.
            let mmap = unsafe { Mmap::map(&f) }?;
            Ok(Box::new(Cursor::new(mmap)))
        }
        #[cfg(not(feature = "mmap"))]
        {
            Ok(Box::new(f))
        }
    }
}
