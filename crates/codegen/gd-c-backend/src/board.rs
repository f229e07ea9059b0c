//! Box-drawing board printout

/// `printf` statements drawing the board variable `name` as a grid
///
/// Rows are printed top to bottom, so the highest row comes first and each row is
/// followed by its 1-based number. Each cell shows the first character of the name of
/// the piece stored there; columns are labelled `A`, `B`, ... underneath.
pub fn render_board(name: &str, width: u32, height: u32) -> String {
    let mut out = String::new();
    border(&mut out, ['┌', '┬', '┐'], width);
    for y in (1..=height).rev() {
        for x in 0..width {
            out.push_str(&format!("printf(\"│ %c \", *{name}[{}][{x}]->name);\n", y - 1));
        }
        out.push_str(&format!("printf(\"│ {y}\\n\");\n"));
        if y > 1 {
            border(&mut out, ['├', '┼', '┤'], width);
        } else {
            border(&mut out, ['└', '┴', '┘'], width);
        }
    }
    for x in 0..width {
        out.push_str(&format!("printf(\"  {} \");\n", column_label(x)));
    }
    out.push_str("printf(\"\\n\");\n");
    out
}

fn border(out: &mut String, [left, middle, right]: [char; 3], width: u32) {
    out.push_str(&format!("printf(\"{left}───\");\n"));
    for _ in 1..width {
        out.push_str(&format!("printf(\"{middle}───\");\n"));
    }
    out.push_str(&format!("printf(\"{right}\\n\");\n"));
}

fn column_label(x: u32) -> char {
    char::from_u32(u32::from(b'A') + x).unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_borders_and_labels() {
        let out = render_board("board", 3, 2);

        assert_eq!(count(&out, "┌───"), 1);
        assert_eq!(count(&out, "┬───"), 2);
        assert_eq!(count(&out, "├───"), 1);
        assert_eq!(count(&out, "┼───"), 2);
        assert_eq!(count(&out, "└───"), 1);
        assert_eq!(count(&out, "┴───"), 2);
        assert_eq!(count(&out, "\"  A \""), 1);
        assert_eq!(count(&out, "\"  C \""), 1);
        assert_eq!(count(&out, "\"  D \""), 0);
    }

    #[test]
    fn test_rows_top_down() {
        let out = render_board("b", 2, 3);
        let top = out.find("printf(\"│ 3\\n\");").unwrap();
        let bottom = out.find("printf(\"│ 1\\n\");").unwrap();
        assert!(top < bottom);

        let first_cell = out.find("*b[2][0]->name").unwrap();
        let last_cell = out.find("*b[0][1]->name").unwrap();
        assert!(first_cell < last_cell);
        assert_eq!(count(&out, "->name"), 6);
    }

    #[test]
    fn test_single_cell() {
        assert_eq!(
            render_board("b", 1, 1),
            "printf(\"┌───\");\n\
             printf(\"┐\\n\");\n\
             printf(\"│ %c \", *b[0][0]->name);\n\
             printf(\"│ 1\\n\");\n\
             printf(\"└───\");\n\
             printf(\"┘\\n\");\n\
             printf(\"  A \");\n\
             printf(\"\\n\");\n"
        );
    }
}
