//! HTML rendering for the photo list page

use crate::types::PhotoView;

/// Escape text for safe inclusion in HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the index page: upload form followed by one card per photo
pub fn index_page(photos: &[PhotoView]) -> String {
    let mut cards = String::new();
    if photos.is_empty() {
        cards.push_str("  <p class=\"empty\">No photos yet.</p>\n");
    }
    for photo in photos {
        cards.push_str(&format!(
            r#"  <div class="photo">
    <img src="{src}" alt="{title}">
    <h3>{title}</h3>
    <p>{description}</p>
    <small>{uploaded}</small>
    <form action="/photos/{id}" method="post" enctype="multipart/form-data">
      <input type="text" name="judul" value="{title}">
      <input type="text" name="deskripsi" value="{description}">
      <input type="file" name="file" accept=".jpg,.jpeg,.png">
      <button type="submit">Update</button>
    </form>
    <form action="/photos/delete/{id}" method="post">
      <button type="submit">Delete</button>
    </form>
  </div>
"#,
            id = photo.id,
            src = escape_html(&photo.storage_reference),
            title = escape_html(&photo.title),
            description = escape_html(&photo.description),
            uploaded = escape_html(&photo.uploaded),
        ));
    }

    format!("{PAGE_HEAD}{cards}{PAGE_TAIL}")
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Photo Catalog</title>
  <style>
    body { font-family: sans-serif; padding: 1rem; }
    .photo { display: inline-block; vertical-align: top; width: 260px; margin: 0.5rem; }
    .photo img { max-width: 100%; }
    .empty { color: #666; }
  </style>
</head>
<body>
  <h1>Photo Catalog</h1>
  <form action="/upload" method="post" enctype="multipart/form-data">
    <input type="text" name="judul" placeholder="Title">
    <input type="text" name="deskripsi" placeholder="Description">
    <input type="file" name="file" accept=".jpg,.jpeg,.png" required>
    <button type="submit">Upload</button>
  </form>
  <hr>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn view(id: i64, title: &str) -> PhotoView {
        PhotoView {
            id,
            title: title.to_string(),
            description: "desc".to_string(),
            storage_reference: format!("/uploads/{id}.png"),
            created_at: Utc::now(),
            uploaded: "05 Mar 2026 14:07".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_empty_page() {
        let html = index_page(&[]);
        assert!(html.contains("No photos yet."));
        assert!(html.contains(r#"action="/upload""#));
    }

    #[test]
    fn test_page_lists_photos() {
        let html = index_page(&[view(1, "Sunset"), view(2, "<script>")]);
        assert!(html.contains(r#"<img src="/uploads/1.png" alt="Sunset">"#));
        assert!(html.contains(r#"action="/photos/2""#));
        assert!(html.contains(r#"action="/photos/delete/1""#));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("No photos yet."));
    }
}
