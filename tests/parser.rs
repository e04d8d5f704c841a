// tests/parser.rs
//
// Chart-page parsing through the public provider surface: per-source column
// layout, the peak/weeks field split, and tolerance for malformed rows.

use rankland::source::providers::kworb::{parse_table, split_peak_field};
use rankland::source::types::{SourceId, SourceProvider};
use rankland::source::providers::KworbProvider;

/// A kworb-shaped page: header row, then one row per (title, peak, weeks)
/// triple. `title_col` mirrors the real pages (iTunes 1, others 2).
fn page(rows: &[(&str, &str, &str)], title_col: usize) -> String {
    let mut html = String::from(
        "<html><body><table class='sortable'>\
         <tr><th>#</th><th>P+</th><th>Title</th><th>Streams</th><th>Pk</th><th>(x?)</th></tr>",
    );
    for (i, (title, peak, weeks)) in rows.iter().enumerate() {
        let mut cells = vec!["".to_string(); 6];
        cells[0] = (i + 1).to_string();
        cells[title_col] = format!("<a href='../song.html'>{title}</a>");
        cells[3] = "12,345".to_string();
        cells[4] = peak.to_string();
        cells[5] = weeks.to_string();
        html.push_str("<tr>");
        for c in &cells {
            html.push_str(&format!("<td>{c}</td>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table></body></html>");
    html
}

#[test]
fn peak_weeks_split_round_trips() {
    // With a parenthesis, re-concatenation reproduces the raw text.
    for raw in ["1(x20)", "4(x2)", "12(x113)"] {
        let (peak, weeks) = split_peak_field(raw);
        assert_eq!(format!("{peak}({weeks})"), raw);
    }
    // Without one, the whole token is the peak and weeks is the sentinel.
    for raw in ["1", "37", "--"] {
        let (peak, weeks) = split_peak_field(raw);
        assert_eq!(peak, raw);
        assert_eq!(weeks, "-");
    }
}

#[test]
fn youtube_and_spotify_read_title_from_the_third_column() {
    for id in [SourceId::Youtube, SourceId::Spotify] {
        let html = page(&[("Idol", "1", "(x20)"), ("Bling-Bang", "2", "")], 2);
        let table = parse_table(id, &html, 50).unwrap();
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].title, "Idol");
        assert_eq!(table.records[0].peak_position, "1");
        assert_eq!(table.records[0].peak_weeks, "x20");
        assert_eq!(table.records[1].peak_weeks, "-");
    }
}

#[test]
fn itunes_reads_title_from_the_second_column() {
    let html = page(&[("Lemon", "3", "(x5)")], 1);
    let table = parse_table(SourceId::Itunes, &html, 50).unwrap();
    assert_eq!(table.records[0].title, "Lemon");
    assert_eq!(table.records[0].peak_weeks, "x5");
}

#[test]
fn ranks_are_contiguous_from_one() {
    let rows: Vec<(String, String, String)> = (1..=20)
        .map(|i| (format!("Song {i}"), i.to_string(), String::new()))
        .collect();
    let refs: Vec<(&str, &str, &str)> = rows
        .iter()
        .map(|(a, b, c)| (a.as_str(), b.as_str(), c.as_str()))
        .collect();
    let table = parse_table(SourceId::Spotify, &page(&refs, 2), 50).unwrap();
    let ranks: Vec<u32> = table.records.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, (1..=20).collect::<Vec<u32>>());
}

#[test]
fn malformed_row_is_skipped_without_poisoning_the_rest() {
    let mut html = page(&[("Before", "1", "(x2)")], 2);
    // Splice in a truncated row, then a good one.
    html = html.replace(
        "</table>",
        "<tr><td>99</td><td>broken</td></tr>\
         <tr><td>3</td><td>=</td><td>After</td><td>1</td><td>9</td><td></td></tr></table>",
    );
    let table = parse_table(SourceId::Youtube, &html, 50).unwrap();
    let titles: Vec<&str> = table.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Before", "After"]);
}

#[tokio::test]
async fn fixture_provider_goes_through_the_same_parser() {
    let html = page(&[("Provider Song", "1", "(x3)")], 2);
    let p = KworbProvider::from_fixture(SourceId::Youtube, &html, 50);
    let table = p.fetch_table().await.unwrap();
    assert_eq!(p.source(), SourceId::Youtube);
    assert_eq!(table.records[0].title, "Provider Song");
}
