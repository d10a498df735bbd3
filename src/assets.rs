use std::fs;
use std::path::Path;

use anyhow::Context;
use fs_extra::file::CopyOptions;
use log::{info, warn};

/// Mirror referenced images into the asset tree, keeping their relative
/// paths. Sources resolve against the note's directory. A missing source is
/// a warning and the loop moves on; any other copy failure aborts the run.
pub(crate) fn copy_images(
    paths: &[String],
    note_dir: &Path,
    asset_dir: &Path,
) -> anyhow::Result<()> {
    fs::create_dir_all(asset_dir)
        .with_context(|| format!("while creating {:?}", asset_dir))?;

    let mut cp_opts = CopyOptions::new();
    cp_opts.overwrite = true;

    for path in paths {
        let src = note_dir.join(path);
        if !src.exists() {
            warn!("image not found: {:?}", src);
            continue;
        }

        let dst = asset_dir.join(path);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("while creating {:?}", parent))?;
        }

        // keep the source's modification time on the copy
        let stamp = fs::metadata(&src)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("while reading metadata of {:?}", src))?;
        fs_extra::file::copy(&src, &dst, &cp_opts)
            .with_context(|| format!("while copying {:?}", src))?;
        fs::File::options()
            .write(true)
            .open(&dst)?
            .set_modified(stamp)?;

        info!("copied image: {path}");
    }

    Ok(())
}
