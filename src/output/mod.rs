use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::download::CleanedCaptions;
use crate::utils::sanitize_filename;
use crate::CaptionError;

const OUTPUT_EXTENSION: &str = "txt";

/// Work out the output file name for one cleaned subtitle file
///
/// Without a custom name the source name is kept with a `.txt` extension. With
/// one, the sanitized name is used as the stem; when several files are written
/// the language tag (or a 1-based index) keeps them apart.
pub fn output_file_name(
    captions: &CleanedCaptions,
    custom_name: Option<&str>,
    index: usize,
    total: usize,
) -> String {
    let custom_stem = custom_name.and_then(|name| {
        let sanitized = sanitize_filename(name);
        if sanitized.is_empty() {
            tracing::warn!(
                "Custom name {:?} has no usable characters, keeping {}",
                name,
                captions.source_name
            );
            None
        } else {
            Some(sanitized)
        }
    });

    match custom_stem {
        Some(stem) if total <= 1 => format!("{}.{}", stem, OUTPUT_EXTENSION),
        Some(stem) => match captions.language() {
            Some(lang) => format!("{}.{}.{}", stem, lang, OUTPUT_EXTENSION),
            None => format!("{}.{}.{}", stem, index + 1, OUTPUT_EXTENSION),
        },
        None => Path::new(&captions.source_name)
            .with_extension(OUTPUT_EXTENSION)
            .to_string_lossy()
            .into_owned(),
    }
}

/// Claim `name`, or the first free `<stem>.<n>.txt` when it is taken
fn claim_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }

    let stem = Path::new(&name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.clone());

    let mut n = 2;
    loop {
        let candidate = format!("{}.{}.{}", stem, n, OUTPUT_EXTENSION);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn canonical(path: &Path) -> Option<PathBuf> {
    path.canonicalize().ok()
}

/// Pick a distinct output path for every cleaned file
///
/// Fails without writing anything if a target is one of the source files.
pub fn plan_output_paths(
    captions: &[CleanedCaptions],
    dir: &Path,
    custom_name: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let sources: HashSet<PathBuf> = captions
        .iter()
        .filter_map(|item| item.source_path.as_deref().and_then(canonical))
        .collect();

    let mut used = HashSet::new();
    let mut paths = Vec::with_capacity(captions.len());

    for (index, item) in captions.iter().enumerate() {
        let name = claim_name(output_file_name(item, custom_name, index, captions.len()), &mut used);
        let path = dir.join(name);

        if canonical(&path).is_some_and(|target| sources.contains(&target)) {
            return Err(CaptionError::FileError(format!(
                "Refusing to overwrite source file {}",
                path.display()
            ))
            .into());
        }

        paths.push(path);
    }

    Ok(paths)
}

/// Save cleaned captions into a directory, returning the written paths
pub fn save_all(captions: &[CleanedCaptions], dir: &Path, custom_name: Option<&str>) -> Result<Vec<PathBuf>> {
    let paths = plan_output_paths(captions, dir, custom_name)?;

    fs_err::create_dir_all(dir)?;
    for (item, path) in captions.iter().zip(&paths) {
        save_to_file(item, path)?;
    }

    Ok(paths)
}

/// Save one cleaned caption text to file
pub fn save_to_file(captions: &CleanedCaptions, path: &Path) -> Result<()> {
    tracing::debug!(
        "Writing {} line(s) from {} to {}",
        captions.line_count(),
        captions.source_name,
        path.display()
    );

    fs_err::write(path, &captions.text)?;
    Ok(())
}

/// Print cleaned captions to console
pub fn print_to_console(captions: &[CleanedCaptions]) {
    for item in captions {
        if captions.len() > 1 {
            println!("==> {} <==", item.source_name);
        }
        println!("{}", item.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn captions(name: &str, text: &str) -> CleanedCaptions {
        CleanedCaptions {
            source_name: name.to_string(),
            source_path: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_default_name_swaps_extension() {
        let item = captions("My Talk [abc123].en.vtt", "");
        assert_eq!(output_file_name(&item, None, 0, 1), "My Talk [abc123].en.txt");
    }

    #[test]
    fn test_custom_name_single_file() {
        let item = captions("abc123.en.vtt", "");
        assert_eq!(output_file_name(&item, Some("My Video: Part 1!"), 0, 1), "My_Video__Part_1.txt");
    }

    #[test]
    fn test_custom_name_multiple_files() {
        let en = captions("abc123.en.vtt", "");
        let plain = captions("abc123.vtt", "");
        assert_eq!(output_file_name(&en, Some("talk"), 0, 2), "talk.en.txt");
        assert_eq!(output_file_name(&plain, Some("talk"), 1, 2), "talk.2.txt");
    }

    #[test]
    fn test_unusable_custom_name_falls_back() {
        let item = captions("abc123.en.vtt", "");
        assert_eq!(output_file_name(&item, Some("?!?"), 0, 1), "abc123.en.txt");
    }

    #[test]
    fn test_save_all_writes_without_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let items = vec![captions("a.en.vtt", "Hello\nworld"), captions("a.de.vtt", "Hallo")];

        let written = save_all(&items, &out, None).unwrap();

        assert_eq!(written, vec![out.join("a.en.txt"), out.join("a.de.txt")]);
        assert_eq!(fs_err::read_to_string(out.join("a.en.txt")).unwrap(), "Hello\nworld");
        assert_eq!(fs_err::read_to_string(out.join("a.de.txt")).unwrap(), "Hallo");
    }

    #[test]
    fn test_custom_name_same_language_keeps_both_files() {
        let dir = TempDir::new().unwrap();
        let items = vec![captions("a.en.vtt", "first"), captions("b.en.vtt", "second")];

        let written = save_all(&items, dir.path(), Some("talk")).unwrap();

        assert_eq!(written, vec![dir.path().join("talk.en.txt"), dir.path().join("talk.en.2.txt")]);
        assert_eq!(fs_err::read_to_string(&written[0]).unwrap(), "first");
        assert_eq!(fs_err::read_to_string(&written[1]).unwrap(), "second");
    }

    #[test]
    fn test_same_source_name_from_different_dirs_keeps_both_files() {
        let dir = TempDir::new().unwrap();
        let items = vec![captions("a.vtt", "one"), captions("a.vtt", "two")];

        let written = save_all(&items, dir.path(), None).unwrap();

        assert_eq!(written, vec![dir.path().join("a.txt"), dir.path().join("a.2.txt")]);
        let on_disk = fs_err::read_dir(dir.path()).unwrap().count();
        assert_eq!(on_disk, 2);
        assert_eq!(fs_err::read_to_string(&written[0]).unwrap(), "one");
        assert_eq!(fs_err::read_to_string(&written[1]).unwrap(), "two");
    }

    #[test]
    fn test_claim_name_skips_taken_suffixes() {
        let mut used = HashSet::new();
        assert_eq!(claim_name("talk.2.txt".to_string(), &mut used), "talk.2.txt");
        assert_eq!(claim_name("talk.txt".to_string(), &mut used), "talk.txt");
        assert_eq!(claim_name("talk.txt".to_string(), &mut used), "talk.3.txt");
    }

    #[test]
    fn test_refuses_to_overwrite_source_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("notes.txt");
        fs_err::write(&source, "<c>raw</c>").unwrap();
        let item = CleanedCaptions {
            source_name: "notes.txt".to_string(),
            source_path: Some(source.clone()),
            text: "raw".to_string(),
        };

        let err = save_all(&[item], dir.path(), None).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CaptionError>(),
            Some(CaptionError::FileError(msg)) if msg.contains("Refusing to overwrite")
        ));
        assert_eq!(fs_err::read_to_string(&source).unwrap(), "<c>raw</c>");
    }

    #[test]
    fn test_refusal_happens_before_any_write() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("b.txt");
        fs_err::write(&source, "keep").unwrap();
        let items = vec![
            captions("a.vtt", "cleaned a"),
            CleanedCaptions {
                source_name: "b.txt".to_string(),
                source_path: Some(source.clone()),
                text: "cleaned b".to_string(),
            },
        ];

        assert!(save_all(&items, dir.path(), None).is_err());
        assert!(!dir.path().join("a.txt").exists());
        assert_eq!(fs_err::read_to_string(&source).unwrap(), "keep");
    }
}
