use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::debug;

use crate::assets::copy_images;
use crate::config::Config;
use crate::document::Document;
use crate::transform::{image_paths, transform_body};

/// Run the whole pipeline for one note and return the path of the written
/// post. With `copy` set, referenced images are additionally mirrored into
/// the asset directory, best-effort.
pub(crate) fn convert(input: &Path, config: &Config, copy: bool) -> anyhow::Result<PathBuf> {
    let mut doc = Document::load(input)?;
    doc.validate()?;

    let slug = doc.derive_slug();
    doc.fill_defaults(config.today);
    debug!("slug {slug:?}, {} attributes", doc.attrs.len());

    let rendered = doc.render(&transform_body(&doc.body));
    let out_path = write_post(&config.post_dir, &slug, &rendered)?;

    if copy {
        // scan the original body; the transformed one no longer contains
        // markdown image syntax
        let note_dir = input.parent().unwrap_or(Path::new(""));
        copy_images(&image_paths(&doc.body), note_dir, &config.asset_dir)?;
    }

    Ok(out_path)
}

/// Write the rendered post as `<slug>.mdx`, creating the directory as
/// needed and silently replacing an existing file with the same slug.
fn write_post(post_dir: &Path, slug: &str, rendered: &str) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(post_dir).with_context(|| format!("while creating {:?}", post_dir))?;
    let out_path = post_dir.join(format!("{slug}.mdx"));
    fs::write(&out_path, rendered).with_context(|| format!("while writing {:?}", out_path))?;
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn test_config(root: &Path) -> Config {
        Config {
            post_dir: root.join("src/content/post"),
            asset_dir: root.join("src/assets/blog"),
            today: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn end_to_end_conversion() {
        let tmp = TempDir::new().unwrap();
        let note = tmp.path().join("note.md");
        fs::write(&note, "---\ntitle: Hello World\n---\nintro ![](pics/x.png)\n").unwrap();

        let out_path = convert(&note, &test_config(tmp.path()), false).unwrap();

        assert_eq!(out_path, tmp.path().join("src/content/post/hello-world.mdx"));
        let out = fs::read_to_string(out_path).unwrap();
        assert!(out.contains("slug: hello-world\n"));
        assert!(out.contains("pubDate: 2024-06-01\n"));
        assert!(out.contains("draft: true\n"));
        assert!(out.contains(r#"src={import("../assets/blog/pics/x.png")}"#));
        assert!(out.contains(r#"caption="x""#));
    }

    #[test]
    fn missing_input_fails_before_writing() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());

        let res = convert(&tmp.path().join("absent.md"), &config, false);

        assert!(res.is_err());
        assert!(!config.post_dir.exists());
    }

    #[test]
    fn missing_title_fails_before_writing() {
        let tmp = TempDir::new().unwrap();
        let note = tmp.path().join("note.md");
        fs::write(&note, "---\ndate: 2024-01-01\n---\nhello\n").unwrap();
        let config = test_config(tmp.path());

        let res = convert(&note, &config, false);

        assert!(res.is_err());
        assert!(!config.post_dir.exists());
    }

    #[test]
    fn copy_flag_mirrors_only_existing_images() {
        let tmp = TempDir::new().unwrap();
        let vault = tmp.path().join("vault");
        fs::create_dir_all(vault.join("pics")).unwrap();
        fs::write(vault.join("pics/real.png"), b"png").unwrap();
        let note = vault.join("note.md");
        fs::write(
            &note,
            "---\ntitle: Pics\n---\n![a](pics/real.png)\n![b](pics/ghost.png)\n",
        )
        .unwrap();
        let config = test_config(tmp.path());

        convert(&note, &config, true).unwrap();

        assert!(config.asset_dir.join("pics/real.png").exists());
        assert!(!config.asset_dir.join("pics/ghost.png").exists());
    }

    #[test]
    fn second_run_silently_overwrites() {
        let tmp = TempDir::new().unwrap();
        let note = tmp.path().join("note.md");
        let config = test_config(tmp.path());

        fs::write(&note, "---\ntitle: Same Slug\n---\nfirst\n").unwrap();
        convert(&note, &config, false).unwrap();
        fs::write(&note, "---\ntitle: Same Slug\n---\nsecond\n").unwrap();
        convert(&note, &config, false).unwrap();

        let out =
            fs::read_to_string(config.post_dir.join("same-slug.mdx")).unwrap();
        assert!(out.contains("second"));
        assert!(!out.contains("first"));
    }
}
