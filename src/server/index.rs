use crate::server::AppState;
use crate::utils::constants::API_PREFIX;
use axum::extract::State;
use axum::response::Html;

/// (description, example path under the API prefix)
const ROUTES: &[(&str, &str)] = &[
    ("Precipitations", "precipitation"),
    ("List of Stations", "stations"),
    ("List of Temperature Observations", "tobs"),
    (
        "Minimum, maximum and average temperatures for the dates greater than or equal to the date provided",
        "2017-01-01",
    ),
    (
        "Minimum, maximum and average temperatures for dates in range",
        "2017-01-01/2017-01-07",
    ),
];

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.site_title))
}

pub fn render_index(title: &str) -> String {
    let mut html = String::new();
    html.push_str("<html>\n");
    html.push_str(&format!("<h1>{}</h1>\n<ul>\n", title));
    for (description, path) in ROUTES {
        let href = format!("{API_PREFIX}/{path}");
        html.push_str(&format!(
            "<li>\n{description}:\n<br>\n<a href=\"{href}\">{href}</a>\n</li>\n<br>\n"
        ));
    }
    html.push_str("</ul>\n</html>\n");
    html
}
