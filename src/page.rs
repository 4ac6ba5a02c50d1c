//! In-memory model of one generated dashboard page.
//!
//! A page declares its drawing surfaces and menu containers up front; charts
//! then mount onto surfaces by id and menus populate containers by id. A
//! chart targeting an unknown surface is a hard error, while a menu aimed at
//! an absent container is a silent no-op: pages simply may not carry that
//! menu section.

use crate::chart::{line_chart, ChartBackend, ChartConfig};
use crate::error::{Error, Result};
use crate::stats::BandSeries;

#[derive(Debug)]
struct Surface {
    id: String,
    heading: String,
    chart: Option<ChartConfig>,
}

#[derive(Debug)]
struct MenuContainer {
    id: String,
    label: String,
    items: String,
}

/// A dashboard page under assembly.
#[derive(Debug)]
pub struct Page {
    name: String,
    title: String,
    chart_height: u32,
    surfaces: Vec<Surface>,
    menus: Vec<MenuContainer>,
    sections: Vec<String>,
}

impl Page {
    /// `name` is the output file stem; `title` the document heading.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            chart_height: 320,
            surfaces: Vec::new(),
            menus: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chart_height(mut self, height: u32) -> Self {
        self.chart_height = height;
        self
    }

    /// Declare a drawing surface under the given heading.
    pub fn add_surface(&mut self, id: impl Into<String>, heading: impl Into<String>) {
        self.surfaces.push(Surface { id: id.into(), heading: heading.into(), chart: None });
    }

    /// Declare a dropdown menu container.
    pub fn add_menu_container(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.menus.push(MenuContainer { id: id.into(), label: label.into(), items: String::new() });
    }

    /// Append a free-form body section.
    pub fn add_static_section(&mut self, html: impl Into<String>) {
        self.sections.push(html.into());
    }

    pub(crate) fn container_mut(&mut self, id: &str) -> Option<&mut String> {
        self.menus.iter_mut().find(|m| m.id == id).map(|m| &mut m.items)
    }

    /// Mount a severity line chart on the surface `surface_id`.
    ///
    /// The surface must have been declared; a missing surface is fatal.
    /// Label and series lengths are taken as given.
    pub fn add_chart(
        &mut self,
        surface_id: &str,
        labels: &[String],
        title: &str,
        info: &BandSeries,
    ) -> Result<()> {
        let name = self.name.clone();
        let surface = self
            .surfaces
            .iter_mut()
            .find(|s| s.id == surface_id)
            .ok_or_else(|| Error::SurfaceNotFound {
                page: name,
                surface: surface_id.to_string(),
            })?;
        surface.chart = Some(line_chart(labels, title, info));
        Ok(())
    }

    /// Render the complete HTML document.
    pub fn render(&self, backend: &dyn ChartBackend) -> Result<String> {
        let mut body = String::new();

        if !self.menus.is_empty() {
            body.push_str("<nav class=\"team-nav\">\n");
            for menu in &self.menus {
                body.push_str(&format!(
                    "<div class=\"dropdown\">\n<span class=\"dropdown-toggle\">{}</span>\n<ul id=\"{}\" class=\"dropdown-menu\">\n{}</ul>\n</div>\n",
                    menu.label, menu.id, menu.items,
                ));
            }
            body.push_str("</nav>\n");
        }

        body.push_str(&format!("<h1>{}</h1>\n", self.title));

        for section in &self.sections {
            body.push_str(section);
            body.push('\n');
        }

        for surface in &self.surfaces {
            body.push_str(&format!(
                "<section class=\"chart\">\n<h3>{}</h3>\n{}\n</section>\n",
                surface.heading,
                backend.surface(&surface.id, self.chart_height),
            ));
        }

        let mut scripts = String::new();
        for surface in &self.surfaces {
            if let Some(config) = &surface.chart {
                scripts.push_str(&backend.bootstrap(&surface.id, config)?);
                scripts.push('\n');
            }
        }

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="triage.css">
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
</head>
<body>
{body}<script>
{scripts}</script>
</body>
</html>
"#,
            title = self.title,
            body = body,
            scripts = scripts,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartJs;
    use crate::stats::BandSeries;

    fn info() -> BandSeries {
        BandSeries { high: vec![1], normal: vec![2], low: vec![3], all: vec![6] }
    }

    fn labels() -> Vec<String> {
        vec!["2023-Jan".to_string()]
    }

    #[test]
    fn test_add_chart_to_declared_surface() {
        let mut page = Page::new("ann", "Ann");
        page.add_surface("global-raw", "Global");
        page.add_chart("global-raw", &labels(), "Global", &info()).unwrap();

        let html = page.render(&ChartJs).unwrap();
        assert!(html.contains(r#"<canvas id="global-raw""#));
        assert!(html.contains("DOMContentLoaded"));
        assert!(html.contains("blocker+critical+major"));
    }

    #[test]
    fn test_add_chart_missing_surface_is_fatal() {
        let mut page = Page::new("ann", "Ann");
        let err = page.add_chart("nope", &labels(), "Global", &info()).unwrap_err();
        match err {
            Error::SurfaceNotFound { page, surface } => {
                assert_eq!(page, "ann");
                assert_eq!(surface, "nope");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_declared_surface_without_chart_renders_empty() {
        let mut page = Page::new("ann", "Ann");
        page.add_surface("global-raw", "Global");
        let html = page.render(&ChartJs).unwrap();
        assert!(html.contains(r#"<canvas id="global-raw""#));
        assert!(!html.contains("new Chart("));
    }

    #[test]
    fn test_menu_containers_render_with_ids() {
        let mut page = Page::new("ann", "Ann");
        page.add_menu_container("team", "Team");
        page.add_menu_container("manager-team", "Manager");

        let html = page.render(&ChartJs).unwrap();
        assert!(html.contains(r#"<ul id="team" class="dropdown-menu">"#));
        assert!(html.contains(r#"<ul id="manager-team" class="dropdown-menu">"#));
    }

    #[test]
    fn test_chart_height_is_applied() {
        let mut page = Page::new("ann", "Ann").chart_height(400);
        page.add_surface("global-raw", "Global");
        let html = page.render(&ChartJs).unwrap();
        assert!(html.contains(r#"height="400""#));
    }
}
