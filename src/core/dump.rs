//! Opaque binary snapshot of any serde value (bincode encoding).

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

use crate::core::{error::Result, report::Report};

/// Force the `.dat` extension.
#[must_use]
pub fn dat_path(filename: impl AsRef<Path>) -> PathBuf {
    filename.as_ref().with_extension("dat")
}

/// Serialize `data` to `<filename>.dat`, overwriting any existing file.
///
/// An output file that cannot be created is reported and skipped:
/// `Ok(None)`, nothing written.
pub fn dump_data<T>(
    data: &T,
    filename: impl AsRef<Path>,
    report: Option<&mut Report>,
) -> Result<Option<PathBuf>>
where
    T: Serialize + ?Sized,
{
    let path = dat_path(filename);
    let fp = match File::create(&path) {
        Ok(fp) => fp,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unable to open output file");
            return Ok(None);
        }
    };

    let mut out = BufWriter::new(fp);
    bincode::serialize_into(&mut out, data)?;
    out.flush()?;

    if let Some(rep) = report {
        crate::report!(rep, "Data dumped to:", path.display())?;
    }
    Ok(Some(path))
}

/// Load a snapshot written by [`dump_data`].
pub fn load_data<T: DeserializeOwned>(filename: impl AsRef<Path>) -> Result<T> {
    let fp = File::open(dat_path(filename))?;
    Ok(bincode::deserialize_from(BufReader::new(fp))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Run {
        name: String,
        samples: Vec<f64>,
        tags: BTreeMap<String, bool>,
    }

    #[test]
    fn extension_is_forced() {
        assert_eq!(dat_path("a/b.pkl"), PathBuf::from("a/b.dat"));
        assert_eq!(dat_path("noext"), PathBuf::from("noext.dat"));
    }

    #[test]
    fn snapshot_loads_back() {
        let dir = std::env::temp_dir().join(format!("batch_kit_dump_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let run = Run {
            name: "calib".into(),
            samples: vec![1.0, -2.5, 1e-9],
            tags: BTreeMap::from([("ok".to_owned(), true)]),
        };

        let path = dump_data(&run, dir.join("run.bin"), None).unwrap().unwrap();
        assert_eq!(path, dir.join("run.dat"));
        let back: Run = load_data(dir.join("run")).unwrap();
        assert_eq!(back, run);
    }

    #[test]
    fn unopenable_target_is_skipped() {
        let res = dump_data(&[1u8, 2, 3], "/nonexistent/batch-kit/x.dat", None).unwrap();
        assert!(res.is_none());
    }
}
