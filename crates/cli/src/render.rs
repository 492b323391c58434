//! Plain-text rendering of the client views.

use std::fmt::Write;

use marquee_catalog::{FieldErrors, Movie};
use marquee_client::list::EMPTY_PLACEHOLDER;
use marquee_client::MovieRow;

pub fn table(rows: &[MovieRow<'_>]) -> String {
    if rows.is_empty() {
        return format!("{EMPTY_PLACEHOLDER}\n");
    }

    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "{}  {}", row.id, row.name);
        let _ = writeln!(out, "    {}", row.img);

        let mut summary = row.summary.text.clone();
        if row.summary.truncated {
            summary.push('…');
        }
        if let Some(toggle) = row.summary.toggle {
            let _ = write!(summary, " [{toggle}]");
        }
        let _ = writeln!(out, "    {summary}");
    }
    out
}

pub fn movie(movie: &Movie) -> String {
    format!(
        "id:      {}\nname:    {}\nimg:     {}\nsummary: {}\n",
        movie.id, movie.name, movie.img, movie.summary
    )
}

pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}\n"))
        .collect()
}
