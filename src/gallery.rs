//! HTML fragment rendering.
//!
//! Produces the markup a host page includes for one year of photographs:
//! a `<section>` with the first few thumbnails, a hidden list with the rest,
//! and an inline script that moves the hidden items into view when the
//! "show more" button is clicked.
//!
//! ## Generated Markup
//!
//! ```text
//! <section id="2024">
//!   <div id="container">
//!     <h2 class="text-black-50 text-center">2024</h2>
//!     <ul class="js--dynamic-place-2024"> <li>…</li> × visible_count </ul>
//!     <button class="js--add-dynamic-2024 btn">Zobrazit více</button>
//!   </div>
//! </section>
//! <ul class="js--dynamic-items-2024 is-hidden"> <li>…</li> × rest </ul>
//! <script> … </script>
//! ```
//!
//! Each item links the display copy for the lightbox and shows the lazily
//! loaded thumbnail:
//!
//! ```text
//! <li><a href="img/2024/RoboCamp-2024-0001.jpg" data-imagelightbox="h">
//!   <img src="thumb/2024/RoboCamp-2024-0001.jpg" alt=" " loading="lazy"></a></li>
//! ```
//!
//! The script relies on jQuery and an `instanceH` lightbox object provided by
//! the host page. The class names keyed by year are the contract between the
//! two.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/), so names and folders are escaped.
//! The script body is emitted raw; the year it embeds is restricted to
//! letters, digits, `-` and `_` by config validation.

use crate::config::{Job, LayoutConfig};
use maud::{Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Layout options for the rendered fragment.
#[derive(Debug, Clone)]
pub struct GalleryOptions {
    pub visible_count: usize,
    pub more_label: String,
}

impl GalleryOptions {
    pub fn from_layout_config(config: &LayoutConfig) -> Self {
        Self {
            visible_count: config.visible_count,
            more_label: config.more_label.clone(),
        }
    }
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self::from_layout_config(&LayoutConfig::default())
    }
}

/// Split ordered names into the visible group and the hidden remainder.
pub fn split_items(names: &[String], visible_count: usize) -> (&[String], &[String]) {
    names.split_at(visible_count.min(names.len()))
}

/// Render the gallery fragment for `names` in the given order.
pub fn render_gallery(
    names: &[String],
    year: &str,
    full_dir: &Path,
    thumb_dir: &Path,
    options: &GalleryOptions,
) -> Markup {
    let (visible, hidden) = split_items(names, options.visible_count);

    html! {
        section id=(year) {
            div id="container" {
                h2 class="text-black-50 text-center" { (year) }
                ul class=(format!("js--dynamic-place-{year}")) {
                    @for name in visible {
                        (gallery_item(name, full_dir, thumb_dir))
                    }
                }
                button class=(format!("js--add-dynamic-{year} btn")) { (options.more_label) }
            }
        }
        ul class=(format!("js--dynamic-items-{year} is-hidden")) {
            @for name in hidden {
                (gallery_item(name, full_dir, thumb_dir))
            }
        }
        script { (PreEscaped(reveal_script(year))) }
    }
}

/// Render the fragment for a job and write it to `job.html_output`,
/// replacing any previous content.
pub fn write_gallery(
    names: &[String],
    job: &Job,
    options: &GalleryOptions,
) -> Result<(), GalleryError> {
    let markup = render_gallery(names, &job.year, &job.full_dir, &job.thumb_dir, options);

    if let Some(parent) = job
        .html_output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(&job.html_output, markup.into_string())?;
    Ok(())
}

fn gallery_item(name: &str, full_dir: &Path, thumb_dir: &Path) -> Markup {
    html! {
        li {
            a href=(asset_href(full_dir, name)) data-imagelightbox="h" {
                img src=(asset_href(thumb_dir, name)) alt=" " loading="lazy";
            }
        }
    }
}

/// Join a folder and a file name into a forward-slash URL path.
fn asset_href(dir: &Path, name: &str) -> String {
    let base = dir.to_string_lossy().replace('\\', "/");
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}/{name}")
    }
}

fn reveal_script(year: &str) -> String {
    format!(
        r#"
$('.js--add-dynamic-{year}').on('click', function (e) {{
    e.preventDefault();
    var items = $('.js--dynamic-items-{year}');
    instanceH.addToImageLightbox(items.find('a'));
    $('.js--dynamic-place-{year}').append(items.find('li').detach());
    $(this).remove();
    items.remove();
}});
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn names(count: usize) -> Vec<String> {
        (1..=count).map(|n| format!("X-2024-{n:04}.jpg")).collect()
    }

    fn render(names: &[String]) -> String {
        render_gallery(
            names,
            "2024",
            Path::new("img/2024"),
            Path::new("thumb/2024"),
            &GalleryOptions::default(),
        )
        .into_string()
    }

    /// Markup between the opening tag carrying `class` and the next `</ul>`.
    fn list_body<'a>(html: &'a str, class: &str) -> &'a str {
        let open = format!("<ul class=\"{class}\">");
        let start = html.find(&open).expect("list present") + open.len();
        let len = html[start..].find("</ul>").expect("list closed");
        &html[start..start + len]
    }

    #[test]
    fn split_items_caps_visible_group() {
        let all = names(7);
        let (visible, hidden) = split_items(&all, 5);
        assert_eq!(visible.len(), 5);
        assert_eq!(hidden, &all[5..]);

        let few = names(3);
        let (visible, hidden) = split_items(&few, 5);
        assert_eq!(visible.len(), 3);
        assert!(hidden.is_empty());
    }

    #[test]
    fn seven_images_split_five_and_two() {
        let html = render(&names(7));

        let visible = list_body(&html, "js--dynamic-place-2024");
        let hidden = list_body(&html, "js--dynamic-items-2024 is-hidden");
        assert_eq!(visible.matches("<li>").count(), 5);
        assert_eq!(hidden.matches("<li>").count(), 2);
        assert!(visible.contains("X-2024-0005.jpg"));
        assert!(!visible.contains("X-2024-0006.jpg"));
        assert!(hidden.contains("X-2024-0006.jpg"));
        assert!(hidden.contains("X-2024-0007.jpg"));
    }

    #[test]
    fn visible_items_keep_order() {
        let html = render(&names(3));
        let first = html.find("X-2024-0001.jpg").unwrap();
        let second = html.find("X-2024-0002.jpg").unwrap();
        let third = html.find("X-2024-0003.jpg").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn no_images_renders_empty_lists() {
        let html = render(&[]);

        assert_eq!(list_body(&html, "js--dynamic-place-2024"), "");
        assert_eq!(list_body(&html, "js--dynamic-items-2024 is-hidden"), "");
        assert!(html.contains("js--add-dynamic-2024 btn"));
    }

    #[test]
    fn item_links_full_copy_and_thumbnail() {
        let html = render(&names(1));
        assert!(html.contains(
            r#"<li><a href="img/2024/X-2024-0001.jpg" data-imagelightbox="h"><img src="thumb/2024/X-2024-0001.jpg" alt=" " loading="lazy"></a></li>"#
        ));
    }

    #[test]
    fn year_keys_section_and_classes() {
        let html = render_gallery(
            &names(1),
            "2023",
            Path::new("img/2023"),
            Path::new("thumb/2023"),
            &GalleryOptions::default(),
        )
        .into_string();

        assert!(html.starts_with(r#"<section id="2023">"#));
        assert!(html.contains(r#"<h2 class="text-black-50 text-center">2023</h2>"#));
        assert!(html.contains("$('.js--add-dynamic-2023')"));
        assert!(html.contains("$('.js--dynamic-items-2023')"));
        assert!(html.contains("$('.js--dynamic-place-2023')"));
        assert!(html.contains("instanceH.addToImageLightbox(items.find('a'));"));
        assert!(!html.contains("js--dynamic-place-2024"));
    }

    #[test]
    fn custom_layout_options() {
        let options = GalleryOptions {
            visible_count: 2,
            more_label: "Show more".into(),
        };
        let html = render_gallery(
            &names(4),
            "2024",
            Path::new("img"),
            Path::new("thumb"),
            &options,
        )
        .into_string();

        assert_eq!(
            list_body(&html, "js--dynamic-place-2024").matches("<li>").count(),
            2
        );
        assert!(html.contains(">Show more</button>"));
    }

    #[test]
    fn names_and_label_are_escaped() {
        let options = GalleryOptions {
            more_label: "<more>".into(),
            ..GalleryOptions::default()
        };
        let html = render_gallery(
            &["a\"b&c.jpg".to_string()],
            "2024",
            Path::new("img"),
            Path::new("thumb"),
            &options,
        )
        .into_string();

        assert!(html.contains("img/a&quot;b&amp;c.jpg"));
        assert!(html.contains("&lt;more&gt;"));
    }

    #[test]
    fn asset_href_uses_forward_slashes() {
        assert_eq!(asset_href(Path::new("img/2024"), "a.jpg"), "img/2024/a.jpg");
        assert_eq!(asset_href(Path::new("img/2024/"), "a.jpg"), "img/2024/a.jpg");
        assert_eq!(asset_href(Path::new(""), "a.jpg"), "a.jpg");
        assert_eq!(
            asset_href(Path::new(r"site\img"), "a.jpg"),
            "site/img/a.jpg"
        );
    }

    #[test]
    fn write_gallery_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let job = Job {
            year: "2024".into(),
            input_dir: tmp.path().join("original/2024"),
            full_dir: PathBuf::from("img/2024"),
            thumb_dir: PathBuf::from("thumb/2024"),
            prefix: "X-2024".into(),
            html_output: tmp.path().join("out/nested/gallery.html"),
        };

        write_gallery(&names(7), &job, &GalleryOptions::default()).unwrap();
        write_gallery(&names(1), &job, &GalleryOptions::default()).unwrap();

        let written = fs::read_to_string(&job.html_output).unwrap();
        assert_eq!(written.matches("<li>").count(), 1);
        assert!(!written.contains("X-2024-0007.jpg"));
    }
}
