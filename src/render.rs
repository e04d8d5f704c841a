// src/render.rs
//! Static HTML rendering for the published site: the ranking page, its
//! archived copies, and the archive index. Presentation only; everything here
//! consumes the finished ranking verbatim.

use html_escape::encode_text;

use crate::aggregate::CompositeRanking;
use crate::source::types::SourceTable;

/// Page title shown in the header and `<title>`.
const SITE_NAME: &str = "MUSIC RANKING LAND";

/// The main ranking page. `in_archive` switches asset/link paths to `..` so
/// archived copies keep working from inside the archive directory.
pub fn index_page(
    ranking: &CompositeRanking,
    commentary: &str,
    tables: &[SourceTable],
    published_at: &str,
    in_archive: bool,
) -> String {
    let mut main = format!(
        "<h1>{SITE_NAME}</h1><p class='date'>Published: {}</p>",
        encode_text(published_at)
    );

    main.push_str("<div class='main-ranking'>");
    for (i, entry) in ranking.entries.iter().enumerate() {
        main.push_str(&format!(
            "<div class='rank-item'><div class='num'>{}</div>\
             <div class='song-detail'> {} <div class='meta'>Peak:{} / Weeks:{}</div></div></div>",
            i + 1,
            encode_text(&entry.title),
            encode_text(&entry.display.peak_position),
            encode_text(&entry.display.peak_weeks),
        ));
    }
    main.push_str("</div>");

    main.push_str(&format!("<div class='ai-talk-box'>{commentary}</div>"));

    main.push_str("<h3>RAW DATA EVIDENCE</h3><div class='grid'>");
    for table in tables {
        main.push_str(&format!("<div class='col'><h4>{}</h4><table>", table.source.label()));
        main.push_str(
            "<tr><th class='col-rank'>#</th><th class='col-title'>Title</th>\
             <th class='col-pk'>Peak</th><th class='col-weeks'>Weeks</th></tr>",
        );
        for rec in &table.records {
            main.push_str(&format!(
                "<tr><td>{}</td><td class='col-title'>{}</td>\
                 <td class='col-pk'>{}</td><td class='col-weeks'>{}</td></tr>",
                rec.rank,
                encode_text(&rec.title),
                encode_text(&rec.peak_position),
                encode_text(&rec.peak_weeks),
            ));
        }
        main.push_str("</table></div>");
    }
    main.push_str("</div>");

    main.push_str(&format!(
        "<p class='footnote'>Updated: {} | Data: Kworb.net</p>",
        encode_text(published_at)
    ));

    page_shell(&main, in_archive)
}

/// The archive index, listing archived pages newest first. `archives_href`
/// is the link prefix from the site root to the archive directory
/// ([`crate::config::RunConfig::archives_href`]).
pub fn archive_page(pages: &[String], archives_href: &str) -> String {
    let mut main = String::from("<h1>RANKING ARCHIVE</h1><ul class='archive-list'>");
    for name in pages {
        let label = archive_label(name).unwrap_or_else(|| name.clone());
        main.push_str(&format!(
            "<li><a href='{}/{}'>{} edition</a></li>",
            encode_text(archives_href),
            encode_text(name),
            encode_text(&label)
        ));
    }
    main.push_str("</ul>");
    page_shell(&main, false)
}

/// `20260214_1600_index.html` → `2026/02/14_1600`.
fn archive_label(name: &str) -> Option<String> {
    let stamp = name.strip_suffix("_index.html")?;
    if stamp.len() < 13 || !stamp.is_ascii() || !stamp.as_bytes()[..8].iter().all(u8::is_ascii_digit)
    {
        return None;
    }
    Some(format!(
        "{}/{}/{}_{}",
        &stamp[0..4],
        &stamp[4..6],
        &stamp[6..8],
        &stamp[9..13]
    ))
}

fn page_shell(main_content: &str, in_archive: bool) -> String {
    let prefix = if in_archive { ".." } else { "." };
    format!(
        "<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{SITE_NAME}</title>\n\
         <link rel=\"stylesheet\" href=\"{prefix}/style.css\">\n\
         </head>\n<body>\n<div class='container'>\n<main>\n{main_content}\n</main>\n{}\n</div>\n</body>\n</html>\n",
        sidebar(prefix)
    )
}

fn sidebar(prefix: &str) -> String {
    format!(
        "<aside class='sidebar'>\
         <div class='sidebar-box'><h3>MENU</h3><ul>\
         <li><a href='{prefix}/index.html'>HOME (latest)</a></li>\
         <li><a href='{prefix}/archive.html'>ARCHIVE</a></li>\
         </ul></div>\
         <div class='sidebar-box'><h3>ABOUT</h3>\
         <p>Noizzer &amp; Glint's weekly chart digest. One weighted algorithm, three sources, no mercy.</p>\
         </div></aside>"
    )
}
