use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use visit_report_layout::FontFace;
use visit_report_render_core::utils::{flip_y, to_win_ansi};
use visit_report_types::{Color, Rect};

pub(crate) fn font_resource(face: FontFace) -> &'static str {
    match face {
        FontFace::Regular => "F1",
        FontFace::Bold => "F2",
    }
}

#[derive(Default, Clone)]
struct CanvasState {
    font: Option<(FontFace, f32)>,
    fill_color: Option<Color>,
}

/// Content operations for one page, in top-left layout coordinates.
pub(crate) struct PageCanvas {
    page_height: f32,
    content: Content,
    state: CanvasState,
}

impl PageCanvas {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: CanvasState::default(),
        }
    }

    pub fn into_content(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.unit_components();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.state.font != Some((face, size)) {
            self.push("Tf", vec![font_resource(face).into(), size.into()]);
            self.state.font = Some((face, size));
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill_color(color);
        let y = flip_y(rect.bottom(), self.page_height);
        self.push("re", vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()]);
        self.push("f", vec![]);
    }

    /// Filled rectangle with a stroked border.
    pub fn fill_stroke_rect(&mut self, rect: Rect, fill: Color, border: Color, line_width: f32) {
        self.set_fill_color(fill);
        let [r, g, b] = border.unit_components();
        self.push("w", vec![line_width.into()]);
        self.push("RG", vec![r.into(), g.into(), b.into()]);
        let y = flip_y(rect.bottom(), self.page_height);
        self.push("re", vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()]);
        self.push("B", vec![]);
    }

    pub fn hline(&mut self, x1: f32, x2: f32, y: f32, color: Color, line_width: f32) {
        let [r, g, b] = color.unit_components();
        let y = flip_y(y, self.page_height);
        self.push("w", vec![line_width.into()]);
        self.push("RG", vec![r.into(), g.into(), b.into()]);
        self.push("m", vec![x1.into(), y.into()]);
        self.push("l", vec![x2.into(), y.into()]);
        self.push("S", vec![]);
    }

    /// One line of text whose baseline sits at `baseline` (layout coordinates).
    pub fn text(&mut self, x: f32, baseline: f32, face: FontFace, size: f32, color: Color, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.push("BT", vec![]);
        self.set_font(face, size);
        self.set_fill_color(color);
        let pdf_y = flip_y(baseline, self.page_height);
        self.push("Td", vec![x.into(), pdf_y.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    /// Paint image XObject `name` scaled into `rect`.
    pub fn image(&mut self, name: &str, rect: Rect) {
        let y = flip_y(rect.bottom(), self.page_height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                rect.x.into(),
                y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }
}
