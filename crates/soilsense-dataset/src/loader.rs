//! Reading and writing signal tables and annotation files

use soilsense_core::{Axis, Recording, SoilError, SoilResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn csv_error(path: &Path, error: csv::Error) -> SoilError {
    if error.is_io_error() {
        SoilError::Io {
            path: path.display().to_string(),
            reason: error.to_string(),
        }
    } else {
        SoilError::Format {
            reason: format!("{}: {}", path.display(), error),
        }
    }
}

/// Load a signal file: header row, then x, y, z in the first three columns
pub fn read_recording(path: &Path) -> SoilResult<Recording> {
    let file = fs::File::open(path).map_err(|e| SoilError::io(path, e))?;
    let name = path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_recording(&name, file).map_err(|e| match e {
        SoilError::Format { reason } => SoilError::Format {
            reason: format!("{}: {}", path.display(), reason),
        },
        other => other,
    })
}

/// Parse a signal table from any reader
pub fn parse_recording<R: io::Read>(name: &str, reader: R) -> SoilResult<Recording> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut columns: [Vec<f64>; 3] = Default::default();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| SoilError::Format { reason: e.to_string() })?;
        if record.len() < 3 {
            return Err(SoilError::Format {
                reason: format!("row {} has {} columns, need at least 3", row + 1, record.len()),
            });
        }

        for axis in Axis::ALL {
            let field = &record[axis.index()];
            let value = field.parse::<f64>().map_err(|_| SoilError::Format {
                reason: format!("row {} column {}: {:?} is not a number", row + 1, axis, field),
            })?;
            columns[axis.index()].push(value);
        }
    }

    let [x, y, z] = columns;
    Recording::new(name, x, y, z)
}

/// Write a recording as an `x,y,z` table
pub fn write_recording(path: &Path, recording: &Recording) -> SoilResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer.write_record(["x", "y", "z"]).map_err(|e| csv_error(path, e))?;

    for i in 0..recording.len() {
        let row = Axis::ALL.map(|axis| recording.axis(axis)[i].to_string());
        writer.write_record(&row).map_err(|e| csv_error(path, e))?;
    }

    writer.flush().map_err(|e| SoilError::io(path, e))
}

/// Companion annotation path: `<annotation_root>/<stem>.txt`
pub fn annotation_path(annotation_root: &Path, file_name: &str) -> PathBuf {
    annotation_root.join(Path::new(file_name).with_extension("txt"))
}

/// Load event centers, one integer per line
pub fn read_annotations(path: &Path) -> SoilResult<Vec<i64>> {
    let text = fs::read_to_string(path).map_err(|e| SoilError::io(path, e))?;
    parse_annotations(&path.display().to_string(), &text)
}

/// Parse annotation text; whitespace-only lines are skipped
pub fn parse_annotations(source: &str, text: &str) -> SoilResult<Vec<i64>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim().parse::<i64>().map_err(|_| SoilError::AnnotationParse {
                path: source.to_string(),
                line: i + 1,
                content: line.to_string(),
            })
        })
        .collect()
}

pub fn write_annotations(path: &Path, events: &[i64]) -> SoilResult<()> {
    let mut text = String::with_capacity(events.len() * 6);
    for event in events {
        text.push_str(&event.to_string());
        text.push('\n');
    }
    fs::write(path, text).map_err(|e| SoilError::io(path, e))
}

/// Names of the regular files in `dir`, sorted
pub fn list_signal_files(dir: &Path) -> SoilResult<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| SoilError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SoilError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| SoilError::io(entry.path(), e))?;
        if file_type.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recording() {
        let table = "ax,ay,az,temp\n1.0,2.0,3.0,20\n 4.5 ,-1,0,21\n";
        let recording = parse_recording("zwy_dig_1.csv", table.as_bytes()).unwrap();

        assert_eq!(recording.len(), 2);
        assert_eq!(recording.name, "zwy_dig_1.csv");
        assert_eq!(recording.axis(Axis::X), &[1.0, 4.5]);
        assert_eq!(recording.axis(Axis::Y), &[2.0, -1.0]);
        assert_eq!(recording.axis(Axis::Z), &[3.0, 0.0]);
    }

    #[test]
    fn test_too_few_columns() {
        let table = "x,y\n1.0,2.0\n";
        assert!(matches!(
            parse_recording("a.csv", table.as_bytes()),
            Err(SoilError::Format { .. })
        ));
    }

    #[test]
    fn test_non_numeric_value() {
        let table = "x,y,z\n1.0,abc,3.0\n";
        let error = parse_recording("a.csv", table.as_bytes()).unwrap_err();
        assert!(error.to_string().contains("abc"));
    }

    #[test]
    fn test_parse_annotations() {
        let events = parse_annotations("a.txt", "120\n 480\n\n-3\n").unwrap();
        assert_eq!(events, vec![120, 480, -3]);
        assert!(parse_annotations("a.txt", "").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_annotation() {
        let error = parse_annotations("a.txt", "120\n4.5\n").unwrap_err();
        assert_eq!(
            error,
            SoilError::AnnotationParse {
                path: "a.txt".to_string(),
                line: 2,
                content: "4.5".to_string(),
            }
        );
    }

    #[test]
    fn test_annotation_path() {
        let path = annotation_path(Path::new("/data/zwy/txt"), "zwy_dig_1.0_1.csv");
        assert_eq!(path, PathBuf::from("/data/zwy/txt/zwy_dig_1.0_1.txt"));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("soilsense-loader-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();

        let recording = Recording::new(
            "zwy_walk_1.csv",
            vec![0.25, 1.5],
            vec![-2.0, 3.0],
            vec![9.75, 9.5],
        ).unwrap();
        let signal_path = dir.join("zwy_walk_1.csv");
        write_recording(&signal_path, &recording).unwrap();
        write_annotations(&dir.join("zwy_walk_1.txt"), &[5, 17]).unwrap();

        let loaded = read_recording(&signal_path).unwrap();
        assert_eq!(loaded.axis(Axis::Z), recording.axis(Axis::Z));
        assert_eq!(read_annotations(&dir.join("zwy_walk_1.txt")).unwrap(), vec![5, 17]);
        assert_eq!(list_signal_files(&dir).unwrap(), vec!["zwy_walk_1.csv", "zwy_walk_1.txt"]);

        assert!(matches!(
            read_recording(&dir.join("missing.csv")),
            Err(SoilError::Io { .. })
        ));

        fs::remove_dir_all(&dir).unwrap();
    }
}
