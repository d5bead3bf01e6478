//! CSV catalog loading
//!
//! A catalog file is CSV with a header row containing at least `Code`,
//! `Name`, `Symptoms` and `Treatments`; other columns are ignored. Files may
//! be gzip-compressed. Empty cells are missing values.

use flate2::read::GzDecoder;
use std::borrow::Cow;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use symptomatch_core::{Catalog, DiseaseCode, DiseaseRecord, Error, Result};
use tracing::{debug, info};

/// Columns every catalog must have
pub const REQUIRED_COLUMNS: [&str; 4] = ["Code", "Name", "Symptoms", "Treatments"];

/// Where to look for a catalog when none is given explicitly
pub const DEFAULT_CATALOG_PATHS: &[&str] = &[
    "Diseases_Symptoms.csv",
    "data/Diseases_Symptoms.csv",
    "data/diseases_symptoms.csv",
];

/// Largest catalog accepted after gzip decompression
pub const MAX_DECOMPRESSED_BYTES: usize = 128 * 1024 * 1024;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

fn csv_error(e: csv::Error) -> Error {
    Error::Csv(e.to_string())
}

/// Parse catalog rows from CSV text
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<DiseaseRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    };
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = column(name)?;
    }
    let [idx_code, idx_name, idx_symptoms, idx_treatments] = indices;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(csv_error)?;
        let cell = |idx: usize| row.get(idx).filter(|v| !v.is_empty());

        let code = cell(idx_code).ok_or_else(|| {
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            Error::Csv(format!("line {}: empty Code", line))
        })?;

        records.push(DiseaseRecord {
            code: DiseaseCode::parse(code),
            name: row.get(idx_name).unwrap_or("").to_string(),
            symptoms: cell(idx_symptoms).map(String::from),
            treatments: cell(idx_treatments).map(String::from),
        });
    }
    Ok(records)
}

/// Parse a catalog from raw file contents, plain or gzip-compressed
pub fn parse_catalog_bytes(bytes: &[u8]) -> Result<Catalog> {
    parse_catalog_bytes_with_limit(bytes, MAX_DECOMPRESSED_BYTES)
}

/// Like [`parse_catalog_bytes`], rejecting gzip input that inflates past `limit`
pub fn parse_catalog_bytes_with_limit(bytes: &[u8], limit: usize) -> Result<Catalog> {
    let decoded: Cow<[u8]> = if bytes.starts_with(&GZIP_MAGIC) {
        let mut out = Vec::new();
        GzDecoder::new(bytes)
            .take(limit as u64 + 1)
            .read_to_end(&mut out)?;
        if out.len() > limit {
            return Err(Error::TooLarge { limit });
        }
        Cow::Owned(out)
    } else {
        Cow::Borrowed(bytes)
    };

    let body = decoded.strip_prefix(UTF8_BOM).unwrap_or(&decoded[..]);
    Catalog::new(parse_records(body)?)
}

/// Read and parse a catalog file
pub fn load_catalog_file<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let catalog = parse_catalog_bytes(&bytes)?;
    info!("Loaded catalog {:?}: {} diseases", path, catalog.len());
    Ok(catalog)
}

/// Write records as CSV in the layout [`parse_records`] reads
pub fn write_records<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a DiseaseRecord>,
{
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    wtr.write_record(REQUIRED_COLUMNS).map_err(csv_error)?;
    for record in records {
        let code = record.code.to_string();
        wtr.write_record([
            code.as_str(),
            record.name.as_str(),
            record.symptoms_text(),
            record.treatments_text(),
        ])
        .map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

/// The fallback search list, relative to the working directory
pub fn default_catalog_paths() -> Vec<PathBuf> {
    DEFAULT_CATALOG_PATHS.iter().map(PathBuf::from).collect()
}

/// Return the first existing file among `candidates`
pub fn find_catalog(candidates: &[PathBuf]) -> Result<PathBuf> {
    for candidate in candidates {
        if candidate.is_file() {
            debug!("Found catalog at {:?}", candidate);
            return Ok(candidate.clone());
        }
        debug!("No catalog at {:?}", candidate);
    }

    let searched: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
    Err(Error::CatalogUnavailable(format!(
        "no catalog file found (searched: {})",
        searched.join(", ")
    )))
}

/// Use `explicit` if given, otherwise search the default locations
pub fn resolve_catalog_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(Error::CatalogUnavailable(format!(
            "catalog file {} does not exist",
            path.display()
        ))),
        None => find_catalog(&default_catalog_paths()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    const SAMPLE: &str = "Code,Name,Symptoms,Treatments\n\
                          1,Flu,fever cough fatigue,rest fluids\n\
                          2,Cold,runny nose sneezing,medication\n\
                          3,Headache,head pain,pain relief\n";

    #[test]
    fn test_parse_records() {
        let records = parse_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].code, DiseaseCode::Integer(1));
        assert_eq!(records[0].name, "Flu");
        assert_eq!(records[2].symptoms_text(), "head pain");
        assert_eq!(records[1].treatments.as_deref(), Some("medication"));
    }

    #[test]
    fn test_column_order_and_extras_ignored() {
        let csv = "Treatments,Extra,Name,Symptoms,Code\n\"rest, fluids\",x,Flu,\"fever, cough\",F-1\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].code, DiseaseCode::String("F-1".to_string()));
        assert_eq!(records[0].treatments_text(), "rest, fluids");
        assert_eq!(records[0].symptoms_text(), "fever, cough");
    }

    #[test]
    fn test_missing_column() {
        let csv = "Code,Name,Symptoms\n1,Flu,fever\n";
        let err = parse_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "Treatments"));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let csv = "Code,Name,Symptoms,Treatments\n1,Flu,,\n2,Cold,  ,sleep\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].symptoms, None);
        assert_eq!(records[0].treatments, None);
        assert_eq!(records[1].symptoms, None);
        assert_eq!(records[1].treatments.as_deref(), Some("sleep"));
    }

    #[test]
    fn test_empty_code_rejected() {
        let csv = "Code,Name,Symptoms,Treatments\n,Flu,fever,rest\n";
        assert!(matches!(parse_records(csv.as_bytes()), Err(Error::Csv(_))));
    }

    #[test]
    fn test_gzip_and_bom() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();
        assert_eq!(parse_catalog_bytes(&compressed).unwrap().len(), 3);

        let mut with_bom = UTF8_BOM.to_vec();
        with_bom.extend_from_slice(SAMPLE.as_bytes());
        assert_eq!(parse_catalog_bytes(&with_bom).unwrap().len(), 3);
    }

    #[test]
    fn test_gzip_output_bounded() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        encoder.write_all(&vec![b'\n'; 64 * 1024]).unwrap();
        let compressed = encoder.finish().unwrap();
        assert!(compressed.len() < 4096);

        let err = parse_catalog_bytes_with_limit(&compressed, 16 * 1024).unwrap_err();
        assert!(matches!(err, Error::TooLarge { limit } if limit == 16 * 1024));

        let inflated = SAMPLE.len() + 64 * 1024;
        assert_eq!(parse_catalog_bytes_with_limit(&compressed, inflated).unwrap().len(), 3);
    }

    #[test]
    fn test_duplicate_codes_fail_load() {
        let csv = "Code,Name,Symptoms,Treatments\n1,Flu,fever,rest\n1,Cold,sneezing,rest\n";
        assert!(matches!(parse_catalog_bytes(csv.as_bytes()), Err(Error::DuplicateCode(_))));
    }

    #[test]
    fn test_write_records_reads_back() {
        let catalog = Catalog::sample();
        let mut out = Vec::new();
        write_records(&mut out, catalog.iter().map(|e| e.record())).unwrap();

        let text = String::from_utf8(out.clone()).unwrap();
        assert!(text.starts_with("Code,Name,Symptoms,Treatments\n"));
        assert_eq!(parse_catalog_bytes(&out).unwrap().len(), 3);
    }

    #[test]
    fn test_find_catalog_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let present = dir.path().join("Diseases_Symptoms.csv");
        std::fs::write(&present, SAMPLE).unwrap();

        let found = find_catalog(&[missing.clone(), present.clone()]).unwrap();
        assert_eq!(found, present);

        let err = find_catalog(&[missing.clone()]).unwrap_err();
        assert!(matches!(err, Error::CatalogUnavailable(ref msg) if msg.contains("missing.csv")));

        assert!(resolve_catalog_path(Some(missing.as_path())).is_err());
        assert_eq!(resolve_catalog_path(Some(present.as_path())).unwrap(), present);
        assert_eq!(load_catalog_file(&present).unwrap().len(), 3);
    }
}
