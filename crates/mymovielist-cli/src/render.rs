use comfy_table::{modifiers, presets, Attribute, Cell, Color, ContentArrangement, Table};
use movielist_core::Membership;
use movielist_models::{ListEntry, MovieDetails, MovieSummary, Review, Troupe};

fn table_with_header(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn movies_table(movies: &[MovieSummary]) -> Table {
    let mut table = table_with_header(&["ID", "Title", "Year", "Rating"]);
    for movie in movies {
        table.add_row(vec![
            Cell::new(&movie.id),
            Cell::new(&movie.title),
            Cell::new(or_dash(movie.release_year)),
            Cell::new(or_dash(movie.vote_average.map(|v| format!("{:.1}", v)))),
        ]);
    }
    table
}

pub fn list_table(entries: &[&ListEntry]) -> Table {
    let mut table = table_with_header(&["ID", "Title", "Status"]);
    for entry in entries {
        let membership = Membership::from_entry(Some(*entry));
        let status = Cell::new(membership.to_string());
        let status = if membership.is_favourite() {
            status.fg(Color::Yellow)
        } else {
            status
        };
        table.add_row(vec![Cell::new(&entry.movie_id), Cell::new(&entry.title), status]);
    }
    table
}

pub fn membership_table(movie_id: &str, title: &str, membership: Membership) -> Table {
    let mut table = table_with_header(&["ID", "Title", "Status"]);
    table.add_row(vec![
        Cell::new(movie_id),
        Cell::new(title),
        Cell::new(membership.to_string()).fg(Color::Cyan),
    ]);
    table
}

pub fn movie_table(movie: &MovieDetails) -> Table {
    let mut table = table_with_header(&["Field", "Value"]);
    let names = |people: &[Troupe]| {
        people
            .iter()
            .map(|p| p.full_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let rows: Vec<(&str, String)> = vec![
        ("ID", movie.id.clone()),
        ("Title", movie.title.clone()),
        ("Tagline", or_dash(movie.tagline.as_deref())),
        ("Released", or_dash(movie.release_date.map(|d| d.format("%Y-%m-%d")))),
        ("Year", or_dash(movie.release_year)),
        ("Genres", movie.genres.join(", ")),
        ("Runtime", or_dash(movie.runtime_minutes.map(|m| format!("{} min", m)))),
        (
            "Rating",
            or_dash(movie.vote_average.map(|v| match movie.vote_count {
                Some(count) => format!("{:.1} ({} votes)", v, count),
                None => format!("{:.1}", v),
            })),
        ),
        ("Status", or_dash(movie.status.as_deref())),
        ("Directors", names(&movie.directors)),
        ("Actors", names(&movie.actors)),
        ("Languages", movie.spoken_languages.join(", ")),
        ("Overview", or_dash(movie.overview.as_deref())),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}

pub fn reviews_table(reviews: &[Review]) -> Table {
    let mut table = table_with_header(&["Author", "Vote", "Title", "Review", "Date"]);
    for review in reviews {
        table.add_row(vec![
            Cell::new(or_dash(review.author.as_ref().map(|a| a.username.as_str()))),
            Cell::new(format!("{:.0}", review.vote)),
            Cell::new(&review.title),
            Cell::new(&review.content),
            Cell::new(or_dash(review.date.map(|d| d.format("%Y-%m-%d")))),
        ]);
    }
    table
}

pub fn troupe_table(troupe: &Troupe) -> Table {
    let mut table = table_with_header(&["Movie ID", "Title", "Year"]);
    for movie in &troupe.movies {
        table.add_row(vec![
            Cell::new(&movie.id),
            Cell::new(&movie.title),
            Cell::new(or_dash(movie.release_year)),
        ]);
    }
    table
}

pub fn key_value_table(rows: &[(&str, String)]) -> Table {
    let mut table = table_with_header(&["Setting", "Value"]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}
