//! Static output renderer.

use crate::container::{Container, LineId};
use crate::line::ResolvedLine;

/// Append an output line with its full value in one go.
pub fn render_output<C: Container + ?Sized>(container: &mut C, line: &ResolvedLine) -> LineId {
    let id = container.append_line(&line.class);
    container.set_line_text(id, &line.value);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::dom::Document;
    use crate::line::LineData;

    #[test]
    fn output_is_appended_whole_with_class() {
        let document = Document::parse("<div id=\"t\"></div>");
        let mut container = document.element_by_id("t").unwrap();
        let resolved = LineData::output("Successfully installed")
            .with_class("ok")
            .resolve(&Options::default());

        render_output(&mut container, &resolved);

        assert_eq!(container.line_texts(), vec!["Successfully installed"]);
        assert!(container
            .inner_html()
            .contains("class=\"termynal-output ok\""));
    }
}
