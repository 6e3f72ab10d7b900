use airq_analytics::models::{FilterCriteria, Pollutant, RainCategory};
use airq_analytics::processors::FeatureDeriver;
use airq_analytics::{load, AirQualityAnalyzer, AnalyticsError, DataSource, ObservationTable};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station";
const HOURS: [u32; 4] = [0, 6, 12, 18];

/// Two weeks of January 2017 (the 2nd is a Monday) for two stations, plus
/// one 2018 row. Weekend days run 30 units higher, Dongsi runs higher than
/// Aotizhongxin, and hour 18 is always the daily peak.
fn station_rows(station: &str) -> Vec<String> {
    let offset = if station == "Dongsi" { 10.0 } else { 0.0 };
    let mut rows = Vec::new();

    for day in 2..=15u32 {
        let weekend = matches!(day, 7 | 8 | 14 | 15);
        for hour in HOURS {
            let pm25 = offset + hour as f64 + if weekend { 30.0 } else { 0.0 } + (day % 3) as f64;
            let pm10 = pm25 * 2.0 + if station == "Dongsi" { 50.0 } else { 0.0 };
            let so2 = 4.0 + hour as f64 / 6.0;
            let co = if station == "Dongsi" { "NA".to_string() } else { "700".to_string() };
            let rain = match hour {
                0 if station == "Aotizhongxin" && day == 2 => "NA".to_string(),
                0 => "0".to_string(),
                6 => "10".to_string(),
                12 => "20".to_string(),
                _ => "50".to_string(),
            };
            rows.push(format!(
                "{},2017,1,{},{},{},{},{},30,{},60,-3.1,1020.5,-18.2,{},NNW,4.4,{}",
                rows.len() + 1,
                day,
                hour,
                pm25,
                pm10,
                so2,
                co,
                rain,
                station
            ));
        }
    }

    if station == "Aotizhongxin" {
        rows.push(format!(
            "{},2018,1,1,0,90,120,8,40,900,20,-5.0,1025.0,-20.0,0,N,2.0,{}",
            rows.len() + 1,
            station
        ));
    }
    rows
}

fn write_csv(path: &Path, rows: &[String]) {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(path, content).unwrap();
}

fn load_fixture(dir: &TempDir) -> ObservationTable {
    let mut rows = station_rows("Aotizhongxin");
    rows.extend(station_rows("Dongsi"));
    let path = dir.path().join("air_quality.csv");
    write_csv(&path, &rows);
    load(&DataSource::from(path)).unwrap()
}

fn both_stations() -> FilterCriteria {
    FilterCriteria::new(2017, ["Aotizhongxin", "Dongsi"])
}

#[test]
fn test_load_and_overview() {
    let dir = TempDir::new().unwrap();
    let table = load_fixture(&dir);
    let overview = AirQualityAnalyzer::new(&table).overview();

    assert_eq!(table.len(), 2 * 14 * 4 + 1);
    assert_eq!(overview.years, vec![2017, 2018]);
    assert_eq!(overview.stations, vec!["Aotizhongxin".to_string(), "Dongsi".to_string()]);

    let default = overview.default_criteria().unwrap();
    assert_eq!(default.year(), 2017);
    assert!(default.stations().contains("Aotizhongxin"));
}

#[test]
fn test_directory_matches_single_file() {
    let single = TempDir::new().unwrap();
    let table = load_fixture(&single);

    let split = TempDir::new().unwrap();
    write_csv(&split.path().join("PRSA_Aotizhongxin.csv"), &station_rows("Aotizhongxin"));
    write_csv(&split.path().join("PRSA_Dongsi.csv"), &station_rows("Dongsi"));
    let from_dir = load(&DataSource::from(split.path())).unwrap();

    assert_eq!(from_dir.len(), table.len());
    let analyzer = AirQualityAnalyzer::new(&from_dir);
    assert_eq!(analyzer.overview().stations.len(), 2);
}

#[test]
fn test_derived_features_are_idempotent() {
    let dir = TempDir::new().unwrap();
    let table = load_fixture(&dir);

    let rederived = FeatureDeriver::new().rederive(&table).unwrap();
    assert_eq!(rederived, table);

    for row in &table {
        let weekend = matches!(row.date().format("%a").to_string().as_str(), "Sat" | "Sun");
        assert_eq!(row.is_weekend(), weekend);
    }
}

#[test]
fn test_invalid_calendar_date_is_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad_date.csv");
    write_csv(
        &path,
        &["1,2017,2,30,0,10,20,3,30,700,60,-3.1,1020.5,-18.2,0,N,1.0,Dongsi".to_string()],
    );

    let err = load(&DataSource::from(path)).unwrap_err();
    assert!(matches!(err, AnalyticsError::Schema(_)), "{err}");
}

#[test]
fn test_hourly_peak() {
    let dir = TempDir::new().unwrap();
    let table = load_fixture(&dir);
    let analyzer = AirQualityAnalyzer::new(&table);

    let envelope = analyzer.hourly(&both_stations(), None).unwrap();

    assert_eq!(envelope.pollutant, Pollutant::Pm25);
    assert_eq!(envelope.by_hour.keys().copied().collect::<Vec<_>>(), HOURS.to_vec());
    assert_eq!(envelope.peak_hour, 18);
    assert_eq!(envelope.by_hour[&18].count, 28);
    assert_eq!(Some(envelope.peak_value), envelope.mean_at(18));
    for hour in HOURS {
        assert!(envelope.mean_at(hour).unwrap() <= envelope.peak_value);
    }
}

#[test]
fn test_rain_effect_categories() {
    let dir = TempDir::new().unwrap();
    let table = load_fixture(&dir);
    let analyzer = AirQualityAnalyzer::new(&table);

    let envelope = analyzer.rain_effect(&both_stations(), &[]).unwrap();
    let categories: Vec<RainCategory> = envelope.rows.iter().map(|r| r.category).collect();

    // Exactly 20 is Light and exactly 50 is Moderate; nothing is Heavy
    assert_eq!(
        categories,
        vec![RainCategory::NoRain, RainCategory::Light, RainCategory::Moderate]
    );
    assert_eq!(envelope.row(RainCategory::NoRain).unwrap().rows, 27);
    assert_eq!(envelope.row(RainCategory::Light).unwrap().rows, 56);
    assert_eq!(envelope.row(RainCategory::Moderate).unwrap().rows, 28);
    assert!(envelope.row(RainCategory::Heavy).is_none());

    let dry = envelope.row(RainCategory::NoRain).unwrap();
    let wet = envelope.row(RainCategory::Moderate).unwrap();
    assert!(wet.mean(Pollutant::So2).unwrap() > dry.mean(Pollutant::So2).unwrap());
    assert!(wet.mean(Pollutant::Pm25).unwrap() > dry.mean(Pollutant::Pm25).unwrap());
}

#[test]
fn test_station_ranking() {
    let dir = TempDir::new().unwrap();
    let table = load_fixture(&dir);
    let analyzer = AirQualityAnalyzer::new(&table);

    let envelope = analyzer.station_ranking(&both_stations(), None).unwrap();

    assert_eq!(envelope.pollutant, Pollutant::Pm10);
    assert_eq!(envelope.top_station, "Dongsi");
    assert_eq!(envelope.ranking.len(), 2);
    assert!(envelope.ranking[0].mean >= envelope.ranking[1].mean);
    assert_eq!(envelope.ranking[0].mean, envelope.top_value);
}

#[test]
fn test_weekend_pollution_is_higher() {
    let dir = TempDir::new().unwrap();
    let table = load_fixture(&dir);
    let analyzer = AirQualityAnalyzer::new(&table);

    let envelope = analyzer
        .weekday_weekend(&FilterCriteria::new(2017, ["Aotizhongxin"]), Some("PM2.5"))
        .unwrap();

    assert_eq!(envelope.daily_means.len(), 14);
    assert_eq!(envelope.weekday.count, 10);
    assert_eq!(envelope.weekend.count, 4);
    assert!(envelope.test.statistic < 0.0);
    assert!(envelope.test.p_value >= 0.0 && envelope.test.p_value < 0.05);
    assert_eq!(envelope.test.degrees_of_freedom, 12.0);
    assert!(envelope.test.is_significant(0.05));
}

#[test]
fn test_empty_selection_is_insufficient_data() {
    let dir = TempDir::new().unwrap();
    let table = load_fixture(&dir);
    let analyzer = AirQualityAnalyzer::new(&table);

    let no_stations = FilterCriteria::new(2017, Vec::<String>::new());
    let no_year = FilterCriteria::new(2016, ["Dongsi"]);

    for criteria in [&no_stations, &no_year] {
        assert!(matches!(
            analyzer.hourly(criteria, None),
            Err(AnalyticsError::InsufficientData(_))
        ));
        assert!(matches!(
            analyzer.rain_effect(criteria, &[]),
            Err(AnalyticsError::InsufficientData(_))
        ));
        assert!(matches!(
            analyzer.station_ranking(criteria, None),
            Err(AnalyticsError::InsufficientData(_))
        ));
        assert!(matches!(
            analyzer.weekday_weekend(criteria, None),
            Err(AnalyticsError::InsufficientData(_))
        ));
    }
}

#[test]
fn test_all_missing_column_is_insufficient_data() {
    let dir = TempDir::new().unwrap();
    let table = load_fixture(&dir);
    let analyzer = AirQualityAnalyzer::new(&table);

    let result = analyzer.hourly(&FilterCriteria::new(2017, ["Dongsi"]), Some("CO"));
    assert!(matches!(result, Err(AnalyticsError::InsufficientData(_))));
}

#[test]
fn test_unknown_pollutant() {
    let dir = TempDir::new().unwrap();
    let table = load_fixture(&dir);
    let analyzer = AirQualityAnalyzer::new(&table);

    let result = analyzer.station_ranking(&both_stations(), Some("PM1"));
    assert!(matches!(result, Err(AnalyticsError::UnknownColumn(_))));
}

#[test]
fn test_report_and_quality() {
    let dir = TempDir::new().unwrap();
    let table = load_fixture(&dir);
    let analyzer = AirQualityAnalyzer::new(&table);

    let report = analyzer.report(&both_stations(), None);
    assert!(report.hourly.is_ok());
    assert!(report.rain_effect.is_ok());
    assert!(report.station_ranking.is_ok());
    assert!(report.weekday_weekend.is_ok());

    let quality = analyzer.quality_report();
    assert_eq!(quality.total_records, table.len());
    assert_eq!(quality.station_statistics["Dongsi"].missing(Pollutant::Co), 56);
    assert_eq!(quality.station_statistics["Aotizhongxin"].missing_rain, 1);
    assert_eq!(quality.station_statistics["Aotizhongxin"].missing(Pollutant::Co), 0);
}

#[test]
fn test_analysis_does_not_mutate_table() {
    let dir = TempDir::new().unwrap();
    let table = load_fixture(&dir);
    let before = table.clone();

    let analyzer = AirQualityAnalyzer::new(&table);
    let _ = analyzer.report(&both_stations(), Some("NO2"));

    assert_eq!(table, before);
}
