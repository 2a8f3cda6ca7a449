//! Upload form: image, caption, submit.

use crate::app::{App, PromptKind};
use crate::pages::UploadPage;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::cards::panel;

/// Field line: label plus either the live prompt buffer or the stored value.
fn field<'a>(app: &App, label: &'a str, value: String, editing: Option<&str>) -> Line<'a> {
    match editing {
        Some(buffer) => Line::from(vec![
            Span::styled(label, app.style("prompt")),
            Span::raw(format!("{}_", buffer)),
        ]),
        None => Line::from(vec![Span::styled(label, app.style("muted")), Span::raw(value)]),
    }
}

pub(super) fn render(f: &mut Frame, app: &App, page: &UploadPage, area: Rect) {
    let editing = |kind: PromptKind| {
        app.prompt
            .as_ref()
            .filter(|p| p.kind == kind)
            .map(|p| p.buffer.as_str())
    };

    let image = if page.loading {
        format!("{} reading file...", app.spinner())
    } else {
        match page.draft.image() {
            Some(img) => format!("{} ({}, {} bytes)", img.file_name, img.mime_type, img.byte_len),
            None => "none (press i to choose a file)".to_string(),
        }
    };
    let caption = if page.draft.caption().is_empty() {
        "(press c to add a caption)".to_string()
    } else {
        page.draft.caption().to_string()
    };

    let mut lines = vec![
        field(app, "Image:   ", image, editing(PromptKind::ImagePath)),
        field(app, "Caption: ", caption, editing(PromptKind::Caption)),
        Line::from(""),
    ];

    let submit_style = if page.draft.can_submit() && !page.loading {
        app.style("chip_active")
    } else {
        app.style("muted")
    };
    lines.push(Line::from(vec![
        Span::styled(" Upload Meme ", submit_style),
        Span::styled("  Enter to submit, x to remove image", app.style("muted")),
    ]));

    if let Some(receipt) = &page.last_receipt {
        lines.push(Line::from(""));
        let caption = if receipt.caption.is_empty() {
            String::new()
        } else {
            format!(" \"{}\"", receipt.caption)
        };
        lines.push(Line::from(Span::styled(
            format!("Uploaded {}{} ({} bytes)", receipt.file_name, caption, receipt.byte_len),
            app.style("heading"),
        )));
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel(app, "Upload a meme")),
        area,
    );
}
