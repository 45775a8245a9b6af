//! Zip export of a bundle.
//!
//! Entries are stored uncompressed: generated sites are small text files and
//! the archive only needs to be a valid container. Layout per PKWARE APPNOTE:
//! local headers + data, central directory, end-of-central-directory record.

use crc32fast::Hasher;
use sitegen_types::{GeneratedCode, Result, SitegenError};
use crate::ports::ArchivePort;

const LOCAL_HEADER_SIG: u32 = 0x0403_4b50;
const CENTRAL_HEADER_SIG: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIR_SIG: u32 = 0x0605_4b50;
const VERSION: u16 = 20;
/// General purpose bit 11: names are UTF-8
const FLAG_UTF8: u16 = 0x0800;
const METHOD_STORED: u16 = 0;
/// 1980-01-01 00:00, the DOS epoch
const DOS_TIME: u16 = 0;
const DOS_DATE: u16 = (1 << 5) | 1;

pub const DEFAULT_ARCHIVE_NAME: &str = "sitegen-project.zip";

#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }
}

struct CentralEntry {
    name: Vec<u8>,
    crc: u32,
    size: u32,
    offset: u32,
}

impl ArchivePort for ZipArchiver {
    fn build_archive(&self, code: &GeneratedCode) -> Result<Vec<u8>> {
        let entry_count = u16::try_from(code.len())
            .map_err(|_| SitegenError::Archive(format!("too many files: {}", code.len())))?;

        let mut out = Vec::new();
        let mut central = Vec::with_capacity(code.len());

        for (path, content) in code.iter() {
            let name = path.as_bytes().to_vec();
            let data = content.as_bytes();
            let name_len = u16::try_from(name.len())
                .map_err(|_| SitegenError::Archive(format!("file name too long: {}", path)))?;
            let size = to_u32(data.len(), path)?;
            let offset = to_u32(out.len(), path)?;

            let mut hasher = Hasher::new();
            hasher.update(data);
            let crc = hasher.finalize();

            put_u32(&mut out, LOCAL_HEADER_SIG);
            put_u16(&mut out, VERSION);
            put_u16(&mut out, FLAG_UTF8);
            put_u16(&mut out, METHOD_STORED);
            put_u16(&mut out, DOS_TIME);
            put_u16(&mut out, DOS_DATE);
            put_u32(&mut out, crc);
            put_u32(&mut out, size); // compressed
            put_u32(&mut out, size); // uncompressed
            put_u16(&mut out, name_len);
            put_u16(&mut out, 0); // extra field length
            out.extend_from_slice(&name);
            out.extend_from_slice(data);

            central.push(CentralEntry { name, crc, size, offset });
        }

        let central_start = to_u32(out.len(), "central directory")?;
        for entry in &central {
            put_u32(&mut out, CENTRAL_HEADER_SIG);
            put_u16(&mut out, VERSION); // made by
            put_u16(&mut out, VERSION); // needed
            put_u16(&mut out, FLAG_UTF8);
            put_u16(&mut out, METHOD_STORED);
            put_u16(&mut out, DOS_TIME);
            put_u16(&mut out, DOS_DATE);
            put_u32(&mut out, entry.crc);
            put_u32(&mut out, entry.size);
            put_u32(&mut out, entry.size);
            put_u16(&mut out, entry.name.len() as u16);
            put_u16(&mut out, 0); // extra
            put_u16(&mut out, 0); // comment
            put_u16(&mut out, 0); // disk number start
            put_u16(&mut out, 0); // internal attributes
            put_u32(&mut out, 0); // external attributes
            put_u32(&mut out, entry.offset);
            out.extend_from_slice(&entry.name);
        }
        let central_size = to_u32(out.len(), "central directory")? - central_start;

        put_u32(&mut out, END_OF_CENTRAL_DIR_SIG);
        put_u16(&mut out, 0); // this disk
        put_u16(&mut out, 0); // disk with central directory
        put_u16(&mut out, entry_count);
        put_u16(&mut out, entry_count);
        put_u32(&mut out, central_size);
        put_u32(&mut out, central_start);
        put_u16(&mut out, 0); // comment length

        log::info!("Built zip archive: {} entries, {} bytes", entry_count, out.len());
        Ok(out)
    }

    fn mime_type(&self) -> &str {
        "application/zip"
    }
}

/// Download name for the archive: the project name lowercased with
/// whitespace runs replaced by `-`, or a default without a project.
pub fn archive_file_name(project_name: Option<&str>) -> String {
    match project_name {
        Some(name) if !name.trim().is_empty() => {
            let slug = name.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase();
            format!("{}.zip", slug)
        }
        _ => DEFAULT_ARCHIVE_NAME.to_string(),
    }
}

fn to_u32(n: usize, what: &str) -> Result<u32> {
    u32::try_from(n).map_err(|_| SitegenError::Archive(format!("{} exceeds 4 GiB", what)))
}

fn put_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}
