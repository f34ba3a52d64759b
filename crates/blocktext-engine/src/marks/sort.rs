use std::cmp::Ordering;

use crate::model::Inline;

/// Decorators with a fixed nesting priority, outermost first.
pub const KNOWN_DECORATORS: [&str; 5] = ["strong", "em", "code", "underline", "strike-through"];

/// Marks of the span at `index`, ordered so that the mark running furthest
/// comes first.
///
/// Equal run lengths compare by [`KNOWN_DECORATORS`] position, where an
/// unlisted mark ranks below every listed one, then by key.
pub fn sorted_marks(children: &[Inline], index: usize) -> Vec<&str> {
    let Some(marks) = children.get(index).map(marks_of) else {
        return Vec::new();
    };

    let mut ranked: Vec<(usize, &str)> = marks
        .iter()
        .map(|mark| (run_length(children, index, mark), mark.as_str()))
        .collect();
    ranked.sort_by(|(len_a, a), (len_b, b)| len_b.cmp(len_a).then_with(|| tie_break(a, b)));
    ranked.into_iter().map(|(_, mark)| mark).collect()
}

/// Number of spans, starting at `index`, that carry `mark` without interruption.
pub fn run_length(children: &[Inline], index: usize, mark: &str) -> usize {
    1 + children
        .iter()
        .skip(index + 1)
        .take_while(|child| marks_of(child).iter().any(|m| m == mark))
        .count()
}

fn tie_break(a: &str, b: &str) -> Ordering {
    decorator_rank(a)
        .cmp(&decorator_rank(b))
        .then_with(|| a.cmp(b))
}

fn decorator_rank(mark: &str) -> i32 {
    KNOWN_DECORATORS
        .iter()
        .position(|known| *known == mark)
        .map_or(-1, |pos| pos as i32)
}

fn marks_of(child: &Inline) -> &[String] {
    match child {
        Inline::Span(span) => &span.marks,
        Inline::Object(_) => &[],
    }
}
