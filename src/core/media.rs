//! Image detection

use std::path::Path;
use crate::config::IMAGE_EXT;

/// True if the path has the sprite image extension (case-insensitive).
pub fn is_image(path: &Path) -> bool {
	path.extension()
		.and_then(|e| e.to_str())
		.is_some_and(|e| e.eq_ignore_ascii_case(IMAGE_EXT))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn matches_extension_ignoring_case() {
		assert!(is_image(Path::new("a/spr_0.png")));
		assert!(is_image(Path::new("a/spr_0.PNG")));
		assert!(!is_image(Path::new("a/spr_0.yy")));
		assert!(!is_image(Path::new("a/png")));
	}
}
