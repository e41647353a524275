//! Full HTML pages.

use url::form_urlencoded;

use crate::catalog::ProjectRecord;
use crate::detail::ProjectPage;
use crate::gallery::{status_options, tag_options, GalleryFilter, TagPalette, ALL_STATUSES};
use crate::render::escape_html;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <script src=\"https://cdn.tailwindcss.com?plugins=typography\"></script>\n\
         </head>\n<body class=\"min-h-screen bg-white text-gray-900\">\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn badge(label: &str, classes: &str) -> String {
    format!(
        "<span class=\"rounded-full px-2 py-0.5 text-xs {}\">{}</span>",
        escape_html(classes),
        escape_html(label)
    )
}

/// Redirect target, or the detail page keyed by the full project path.
///
/// The path travels as one segment (`/` becomes `%2F`) so the detail route
/// opens exactly this folder instead of re-resolving a bare name.
fn project_href(project: &ProjectRecord) -> String {
    match &project.redirect_url {
        Some(url) => url.clone(),
        None => {
            let path: String = form_urlencoded::byte_serialize(project.path.as_bytes()).collect();
            // `byte_serialize` encodes spaces as `+`, which paths do not decode.
            format!("/project/{}", path.replace('+', "%20"))
        }
    }
}

fn gallery_href(filter: &GalleryFilter) -> String {
    let query = filter.to_query();
    if query.is_empty() {
        "/".into()
    } else {
        format!("/?{query}")
    }
}

/// Gallery page: filter controls plus one card per matching project.
pub fn gallery_page(projects: &[ProjectRecord], filter: &GalleryFilter, palette: &TagPalette) -> String {
    let mut body = String::new();
    body.push_str(
        "<main class=\"max-w-7xl mx-auto px-4 py-12\">\n\
         <h1 class=\"text-5xl font-bold mb-4\">Projects</h1>\n\
         <p class=\"text-lg text-gray-500 mb-8\">A collection of projects from my GitHub repository. \
         Click on any project to explore its documentation and resources.</p>\n",
    );

    if projects.is_empty() {
        body.push_str("<p class=\"text-center text-gray-500 py-12\">No projects found.</p>\n</main>");
        return layout("Projects", &body);
    }

    // Search + status form; selected tags ride along as hidden fields.
    body.push_str("<form method=\"get\" action=\"/\" class=\"flex flex-wrap gap-4 items-end border rounded-lg p-4 mb-6\">\n");
    body.push_str(&format!(
        "<label class=\"flex flex-col text-sm font-medium\">Search\
         <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search by project name…\" \
         class=\"h-10 rounded-md border px-3\"></label>\n",
        escape_html(&filter.search)
    ));
    body.push_str("<label class=\"flex flex-col text-sm font-medium\">Status<select name=\"status\" class=\"h-10 rounded-md border px-3\">\n");
    body.push_str(&format!("<option value=\"{ALL_STATUSES}\">All</option>\n"));
    for option in status_options(projects) {
        let selected = if filter.status.as_deref() == Some(option.value.as_str()) {
            " selected"
        } else {
            ""
        };
        body.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>\n",
            escape_html(&option.value),
            escape_html(&option.label)
        ));
    }
    body.push_str("</select></label>\n");
    for tag in &filter.tags {
        body.push_str(&format!(
            "<input type=\"hidden\" name=\"tag\" value=\"{}\">\n",
            escape_html(tag)
        ));
    }
    body.push_str("<button type=\"submit\" class=\"h-10 rounded-md border px-4\">Apply</button>\n");
    if filter.is_active() {
        body.push_str("<a href=\"/\" class=\"h-10 px-4 py-2 text-sm\">Clear filters</a>\n");
    }
    body.push_str("</form>\n");

    let tags = tag_options(projects);
    if !tags.is_empty() {
        body.push_str("<div class=\"flex flex-wrap items-center gap-2 mb-6\">\n<span class=\"text-sm font-medium text-gray-500\">Languages &amp; Technologies:</span>\n");
        for tag in tags {
            let active = filter.tags.contains(&tag.value);
            let classes = if active {
                "border-blue-600 bg-blue-50 text-blue-700"
            } else {
                "border-gray-200 text-gray-500"
            };
            body.push_str(&format!(
                "<a href=\"{}\" class=\"rounded-full border px-3 py-1 text-sm {classes}\">{}</a>\n",
                escape_html(&gallery_href(&filter.toggle_tag(&tag.value))),
                escape_html(&tag.label)
            ));
        }
        body.push_str("</div>\n");
    }

    let visible = filter.apply(projects);
    if visible.is_empty() {
        body.push_str("<p class=\"text-center text-gray-500 py-12\">No projects match the current filters.</p>\n");
    } else {
        body.push_str("<div class=\"grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6\">\n");
        for project in visible {
            body.push_str(&project_card(project, palette));
        }
        body.push_str("</div>\n");
    }

    body.push_str("</main>");
    layout("Projects", &body)
}

fn project_card(project: &ProjectRecord, palette: &TagPalette) -> String {
    let mut card = format!(
        "<a href=\"{}\" class=\"block border rounded-lg p-6 hover:shadow-lg\">\n\
         <div class=\"flex justify-between mb-2\"><h2 class=\"text-xl font-semibold\">{}</h2>{}</div>\n",
        escape_html(&project_href(project)),
        escape_html(&project.name),
        badge(project.status.label(), project.status.badge_classes())
    );
    if !project.description.is_empty() {
        card.push_str(&format!(
            "<p class=\"text-sm text-gray-500 mb-4\">{}</p>\n",
            escape_html(&project.description)
        ));
    }
    if !project.tags.is_empty() {
        card.push_str("<div class=\"flex flex-wrap gap-2\">");
        for tag in &project.tags {
            card.push_str(&badge(tag, palette.classes_for(tag)));
        }
        card.push_str("</div>\n");
    }
    card.push_str("</a>\n");
    card
}

/// Detail page: title, tags, file count and each rendered markdown file.
pub fn project_page(page: &ProjectPage, palette: &TagPalette) -> String {
    let mut body = String::from(
        "<main class=\"max-w-5xl mx-auto px-4 py-12\">\n\
         <a href=\"/\" class=\"inline-block mb-8 text-sm\">&larr; Back to Projects</a>\n",
    );
    body.push_str(&format!(
        "<h1 class=\"text-5xl font-bold mb-2\">{}</h1>\n\
         <p class=\"text-sm text-gray-400 mb-4\"><code>{}</code></p>\n",
        escape_html(&page.display_name),
        escape_html(&page.path)
    ));
    body.push_str(&format!(
        "<div class=\"flex flex-wrap gap-2 mb-4\">{}",
        badge(page.status.label(), page.status.badge_classes())
    ));
    for tag in &page.tags {
        body.push_str(&badge(tag, palette.classes_for(tag)));
    }
    body.push_str("</div>\n");

    let noun = if page.file_count == 1 { "file" } else { "files" };
    body.push_str(&format!(
        "<p class=\"text-gray-500 mb-12\">{} {noun} in this project</p>\n",
        page.file_count
    ));

    if page.documents.is_empty() {
        body.push_str("<div class=\"border rounded-lg py-12 text-center text-gray-500\">No markdown files found in this project.</div>\n");
    }
    for doc in &page.documents {
        body.push_str(&format!(
            "<section class=\"border rounded-lg p-6 mb-8\">\n\
             <h2 class=\"text-lg font-semibold mb-4 pb-4 border-b\">{}</h2>\n\
             <article class=\"prose max-w-none\">\n{}</article>\n</section>\n",
            escape_html(&doc.name),
            doc.html
        ));
    }

    body.push_str("</main>");
    layout(&page.display_name, &body)
}

/// 404 page for an unknown project.
pub fn not_found_page(name: &str) -> String {
    let body = format!(
        "<main class=\"max-w-5xl mx-auto px-4 py-12\">\n\
         <h1 class=\"text-4xl font-bold mb-4\">Not found</h1>\n\
         <p class=\"mb-8\">No project named <code>{}</code>.</p>\n\
         <a href=\"/\">&larr; Back to Projects</a>\n</main>",
        escape_html(name)
    );
    layout("Not found", &body)
}
