//! Content-based file hashing

use std::fs::File;
use std::io::Read;
use std::path::Path;
use xxhash_rust::xxh3::Xxh3;

const HASH_BUFFER_SIZE: usize = 65536; // 64KB

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileHash(String);

impl FileHash {
	/// Hash the whole file, streamed in 64KB chunks
	pub fn compute(path: &Path) -> std::io::Result<Self> {
		let mut file = File::open(path)?;
		let mut hasher = Xxh3::new();
		let mut buffer = vec![0u8; HASH_BUFFER_SIZE];
		loop {
			let n = file.read(&mut buffer)?;
			if n == 0 {
				break;
			}
			hasher.update(&buffer[..n]);
		}
		Ok(Self(format!("{:016x}", hasher.digest())))
	}
}
