// src/output.rs
use crate::path::MultiPath;
use chrono::{SecondsFormat, Utc};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// `<label>(<t>) = <value>` for every grid point and dimension, at full
/// round-trip precision
pub fn write_path<W: Write>(out: &mut W, path: &MultiPath, labels: &[String]) -> io::Result<()> {
    write_path_with_precision(out, path, labels, None)
}

/// [`write_path`] with times and values rounded to `precision` decimals
pub fn write_path_with_precision<W: Write>(
    out: &mut W,
    path: &MultiPath,
    labels: &[String],
    precision: Option<usize>,
) -> io::Result<()> {
    check_labels(path, labels)?;
    let fmt = |x: f64| match precision {
        Some(p) => format!("{:.*}", p, x),
        None => x.to_string(),
    };
    for (i, &t) in path.times().iter().enumerate() {
        for (d, label) in labels.iter().enumerate() {
            writeln!(out, "{}({}) = {}", label, fmt(t), fmt(path.value(i, d)))?;
        }
    }
    Ok(())
}

pub fn write_path_to_csv(filename: &str, path: &MultiPath, labels: &[String]) -> io::Result<()> {
    check_labels(path, labels)?;
    let mut file = BufWriter::new(File::create(filename)?);
    writeln!(file, "t,{}", labels.join(","))?;
    for (i, t) in path.times().iter().enumerate() {
        let row = path
            .point(i)
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(file, "{},{}", t, row)?;
    }
    file.flush()
}

/// Key/value summary, prefixed with a `generated_at` UTC timestamp
pub fn write_summary_to_csv(filename: &str, summary_data: &[(&str, String)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(
        file,
        "generated_at,{}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}

fn check_labels(path: &MultiPath, labels: &[String]) -> io::Result<()> {
    if labels.len() != path.dimension() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{} labels for a {}-dimensional path",
                labels.len(),
                path.dimension()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::CorrelationMatrix;
    use crate::mc::path_simulator::PathSimulator;
    use crate::models::gbm::Gbm;
    use crate::rng::seed_rng_from_u64;

    fn labels() -> Vec<String> {
        vec!["x".to_string(), "y".to_string()]
    }

    fn path() -> MultiPath {
        PathSimulator::simulate(
            &[Gbm::new(1.0, 0.05, 0.2), Gbm::new(2.0, 0.03, 0.15)],
            &CorrelationMatrix::identity(2),
            1.0,
            4,
            &mut seed_rng_from_u64(5),
        )
        .unwrap()
    }

    #[test]
    fn test_console_format() {
        let path = path();
        let mut buf = Vec::new();
        write_path(&mut buf, &path, &labels()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5 * 2);
        assert_eq!(lines[0], "x(0) = 1");
        assert_eq!(lines[1], "y(0) = 2");
        assert!(lines[2].starts_with("x(0.25) = "));
        assert!(lines[9].starts_with("y(1) = "));
    }

    #[test]
    fn test_console_format_with_precision() {
        let path = path();
        let mut buf = Vec::new();
        write_path_with_precision(&mut buf, &path, &labels(), Some(3)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5 * 2);
        assert_eq!(lines[0], "x(0.000) = 1.000");
        assert_eq!(lines[1], "y(0.000) = 2.000");
        assert_eq!(lines[2], format!("x(0.250) = {:.3}", path.value(1, 0)));
        assert!(lines[9].starts_with("y(1.000) = "));
    }

    #[test]
    fn test_label_count_mismatch() {
        let path = path();
        let mut buf = Vec::new();
        let err = write_path(&mut buf, &path, &["x".to_string()]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_csv_output() {
        let path = path();
        let file = std::env::temp_dir().join(format!("gbm_paths_{}.csv", std::process::id()));
        let filename = file.to_str().unwrap();
        write_path_to_csv(filename, &path, &labels()).unwrap();

        let text = std::fs::read_to_string(&file).unwrap();
        std::fs::remove_file(&file).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("t,x,y"));
        assert_eq!(lines.next(), Some("0,1,2"));
        assert_eq!(lines.count(), 4);
    }
}
