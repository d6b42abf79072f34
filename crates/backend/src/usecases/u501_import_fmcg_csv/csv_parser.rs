use anyhow::Result;
use chrono::NaiveDate;
use contracts::domain::a001_fmcg_record::FmcgRecord;

/// Records read from an FMCG export, plus the number of rows the reader rejected
#[derive(Debug, Default)]
pub struct ParsedCsv {
    pub records: Vec<FmcgRecord>,
    pub malformed: usize,
}

/// Parse an FMCG sales export.
///
/// Columns are looked up by header name (case-insensitive) so extra columns
/// and reordering are fine. Metrics that fail to parse count as 0; bad
/// year/month/week/date values become empty and are caught by validation.
pub fn parse_fmcg_csv(bytes: &[u8]) -> Result<ParsedCsv> {
    let bytes = bytes.strip_prefix("\u{FEFF}".as_bytes()).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(e) => anyhow::bail!("Failed to read CSV headers: {}", e),
    };
    tracing::debug!("FMCG CSV headers: {:?}", headers.iter().collect::<Vec<_>>());

    let mut out = ParsedCsv::default();
    for result in reader.records() {
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Skipping malformed CSV record: {}", e);
                out.malformed += 1;
                continue;
            }
        };

        let get_field = |name: &str| -> Option<String> {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .and_then(|i| row.get(i))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty() && v != "NaT")
        };
        let get_int = |name: &str| get_field(name).and_then(|v| parse_int(&v));
        let get_metric = |name: &str| get_field(name).and_then(|v| parse_decimal(&v)).unwrap_or(0.0);

        out.records.push(FmcgRecord {
            id: None,
            market: get_field("Market"),
            channel: get_field("Channel"),
            region: get_field("Region"),
            category: get_field("Category"),
            sub_category: get_field("SubCategory"),
            brand: get_field("Brand"),
            variant: get_field("Variant"),
            pack_type: get_field("PackType"),
            ppg: get_field("PPG"),
            pack_size: get_field("PackSize"),
            year: get_int("Year"),
            month: get_int("Month"),
            week: get_int("Week"),
            date: get_field("date").and_then(|d| parse_date(&d)),
            br_cat_id: get_field("BrCatId"),
            sales_value: get_metric("SalesValue"),
            volume: get_metric("Volume"),
            volume_units: get_metric("VolumeUnits"),
        });
    }

    Ok(out)
}

fn parse_decimal(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts "2023" as well as "2023.0" from spreadsheet exports.
/// Values outside the `i32` range count as missing.
fn parse_int(s: &str) -> Option<i32> {
    s.parse::<i32>().ok().or_else(|| {
        parse_decimal(s)
            .filter(|v| v.fract() == 0.0)
            .and_then(|v| i32::try_from(v as i64).ok())
    })
}

/// Export dates are dd-mm-YYYY; ISO dates are accepted too
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%d-%m-%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{FEFF}Market,Channel,Region,Category,SubCategory,Brand,Variant,PackType,PPG,PackSize,Year,Month,Week,date,BrCatId,SalesValue,Volume,VolumeUnits,D1\n\
UK,Tesco,North,Snacks,Crisps,Brand 1,Salted,Small,Small Single,40g,2022,1,2,10-01-2022,B1C1,1234.5,10.25,20,0\n\
UK,Iceland,South,Snacks,Crisps,Brand 2,Spicy,Large,Others,200g,2023.0,12,50,NaT,B2C1,n/a,,3,0\n";

    #[test]
    fn test_parse_export_rows() {
        let parsed = parse_fmcg_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(parsed.malformed, 0);
        assert_eq!(parsed.records.len(), 2);

        let first = &parsed.records[0];
        assert_eq!(first.market.as_deref(), Some("UK"));
        assert_eq!(first.sub_category.as_deref(), Some("Crisps"));
        assert_eq!(first.ppg.as_deref(), Some("Small Single"));
        assert_eq!((first.year, first.month, first.week), (Some(2022), Some(1), Some(2)));
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2022, 1, 10));
        assert_eq!(first.sales_value, 1234.5);
        assert_eq!(first.volume_units, 20.0);
        assert!(first.validate().is_ok());

        let second = &parsed.records[1];
        assert_eq!(second.year, Some(2023));
        assert_eq!(second.date, None);
        assert_eq!(second.sales_value, 0.0);
        assert_eq!(second.volume, 0.0);
    }

    #[test]
    fn test_missing_columns_leave_fields_empty() {
        let csv = "Brand,Year\nBrand 3,2021\n";
        let parsed = parse_fmcg_csv(csv.as_bytes()).unwrap();
        let rec = &parsed.records[0];
        assert_eq!(rec.brand.as_deref(), Some("Brand 3"));
        assert!(rec.channel.is_none());
        assert!(rec.validate().is_err());
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("7"), Some(7));
        assert_eq!(parse_int("7.0"), Some(7));
        assert_eq!(parse_int("7.5"), None);
        assert_eq!(parse_int("x"), None);
        assert_eq!(parse_int("-3.0"), Some(-3));
    }

    #[test]
    fn test_parse_int_rejects_out_of_range() {
        assert_eq!(parse_int("1e20"), None);
        assert_eq!(parse_int("3000000000"), None);
        assert_eq!(parse_int("-3000000000.0"), None);
        assert_eq!(parse_int("2147483647.0"), Some(i32::MAX));

        let csv = "Brand,Year,Month\nBrand 1,1e20,1\n";
        let parsed = parse_fmcg_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed.records[0].year, None);
        assert!(parsed.records[0].validate().is_err());
    }
}
