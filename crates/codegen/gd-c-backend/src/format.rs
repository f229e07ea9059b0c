//! C rendering of the structural sections

use gd_structure::{Owner, PieceDef, PlayerDef, SetupStruct, TargetFormat, WinCondition};

/// Loop counter of the placeholder game loop
const ROUND_COUNTER: &str = "griddy_round";

/// [`TargetFormat`] producing C statements
#[derive(Debug, Clone, Copy, Default)]
pub struct CFormat;

impl TargetFormat for CFormat {
    fn format_setup(&self, setup: &SetupStruct) -> String {
        let mut out = String::from("/*    SETUP    */\n");
        out.push_str(&setup.body);
        out.push_str(&self.format_player_def(&setup.player_def));
        if let Some(board) = setup.board() {
            for (x, y, cell) in board.occupied_cells() {
                out.push_str(&format!(
                    "{}[{y}][{x}] = &{}{};\n",
                    board.name(),
                    cell.piece,
                    cell.owner.prefix()
                ));
            }
        }
        out
    }

    fn format_player_def(&self, player_def: &PlayerDef) -> String {
        let mut out = String::new();
        for owner in [Owner::PlayerOne, Owner::PlayerTwo] {
            for piece in player_def.pieces(owner).values() {
                out.push_str(&self.format_piece_def(&piece.qualified_name(), piece));
            }
        }
        out
    }

    fn format_piece_def(&self, qualified_name: &str, piece: &PieceDef) -> String {
        let props = &piece.props;
        let mut out = format!("struct Piece {qualified_name};\n");
        out.push_str(&copy_string(&format!("{qualified_name}.name"), props.display_name()));
        out.push_str(&format!("{qualified_name}.limit = {};\n", limit_literal(props.limit)));
        out.push_str(&format!("{qualified_name}.count = {};\n", props.count));
        out.push_str(&format!("{qualified_name}.capture = {};\n", flag(props.capture)));
        out.push_str(&format!("{qualified_name}.placeable = {};\n", flag(props.placeable)));
        out.push_str(&format!("{qualified_name}.can_jump = {};\n", flag(props.can_jump)));
        out
    }

    fn format_game(&self, body: &str, win_condition: &WinCondition) -> String {
        match win_condition {
            WinCondition::Placeholder { rounds } => format!(
                "/*    GAME    */\nint {ROUND_COUNTER} = {rounds};\ndo {{\n{body}}} while (0 < {ROUND_COUNTER}--);\n"
            ),
            WinCondition::Condition(condition) => {
                format!("/*    GAME    */\ndo {{\n{body}}} while ({condition});\n")
            }
        }
    }
}

/// Allocate `target` and copy the literal `text` into it
pub(crate) fn copy_string(target: &str, text: &str) -> String {
    format!(
        "{target} = calloc({}, sizeof(char));\nstrcpy({target}, {});\n",
        text.len() + 1,
        string_literal(text)
    )
}

/// Grow `target` and copy the literal `text` into it
pub(crate) fn recopy_string(target: &str, text: &str) -> String {
    format!(
        "{target} = realloc({target}, {});\nstrcpy({target}, {});\n",
        text.len() + 1,
        string_literal(text)
    )
}

/// Quoted and escaped C string literal
pub(crate) fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Piece limits use `UINT_MAX` for "unbounded"
pub(crate) fn limit_literal(limit: u32) -> String {
    if limit == u32::MAX {
        "UINT_MAX".to_string()
    } else {
        limit.to_string()
    }
}

pub(crate) fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gd_structure::{CodegenConfig, GriddyStructure, PieceDefaults};

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(string_literal("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(string_literal("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn test_copy_string_sizes_by_bytes() {
        assert_eq!(
            copy_string("x", "hello"),
            "x = calloc(6, sizeof(char));\nstrcpy(x, \"hello\");\n"
        );
        assert!(copy_string("x", "é").starts_with("x = calloc(3,"));
        assert_eq!(
            recopy_string("x", "hi"),
            "x = realloc(x, 3);\nstrcpy(x, \"hi\");\n"
        );
    }

    #[test]
    fn test_piece_def() {
        let mut piece = PieceDef::template("pawn", PieceDefaults::default());
        piece.props.label = Some("P".to_string());
        piece.props.limit = 8;
        piece.props.count = 2;
        let copy = piece.duplicate_for(Owner::PlayerTwo).unwrap();

        let out = CFormat.format_piece_def(&copy.qualified_name(), &copy);
        assert_eq!(
            out,
            "struct Piece pawn_p2;\n\
             pawn_p2.name = calloc(2, sizeof(char));\n\
             strcpy(pawn_p2.name, \"P\");\n\
             pawn_p2.limit = 8;\n\
             pawn_p2.count = 2;\n\
             pawn_p2.capture = 0;\n\
             pawn_p2.placeable = 1;\n\
             pawn_p2.can_jump = 0;\n"
        );
    }

    #[test]
    fn test_unbounded_limit() {
        let piece = PieceDef::template("king", PieceDefaults::default());
        let out = CFormat.format_piece_def("king_p1", &piece);
        assert!(out.contains("king_p1.limit = UINT_MAX;\n"));
        assert!(out.contains("strcpy(king_p1.name, \"king\");"));
    }

    #[test]
    fn test_setup_places_both_players() {
        let mut structure = GriddyStructure::new(&CodegenConfig::default());
        structure.setup.init_board("board", 3, 3).unwrap();
        let mut pawn = PieceDef::template("pawn", PieceDefaults::default());
        pawn.add_start_position(1, 1);
        structure.setup.register_piece_template(pawn).unwrap();
        structure.setup.body.push_str("/* body */\n");
        structure.setup.place_all_pieces().unwrap();

        let out = CFormat.format_setup(&structure.setup);
        assert!(out.starts_with("/*    SETUP    */\n/* body */\nstruct Piece pawn_p1;\n"));
        assert!(out.find("struct Piece pawn_p1;").unwrap() < out.find("struct Piece pawn_p2;").unwrap());
        assert!(out.contains("pawn_p1.count = 1;\n"));
        assert!(out.contains("pawn_p2.count = 1;\n"));
        assert!(out.ends_with("board[0][0] = &pawn_p1;\nboard[2][0] = &pawn_p2;\n"));
    }

    #[test]
    fn test_game_loops() {
        let placeholder = CFormat.format_game("x = 1;\n", &WinCondition::Placeholder { rounds: 5 });
        assert_eq!(
            placeholder,
            "/*    GAME    */\nint griddy_round = 5;\ndo {\nx = 1;\n} while (0 < griddy_round--);\n"
        );

        let custom = CFormat.format_game("", &WinCondition::Condition("!done".to_string()));
        assert_eq!(custom, "/*    GAME    */\ndo {\n} while (!done);\n");
    }
}
