//! Snapshot tests of generated programs

use expect_test::expect;
use gd_ast::{Ast, SourceNode};
use gd_c_backend::CBackend;
use gd_integration_tests::{compile_tree, game_section, setup_section};
use gd_structure::{CodegenConfig, GriddyStructure, WinCondition, collect};

fn pawn_on_small_board() -> Vec<SourceNode> {
    vec![
        SourceNode::assign("board", SourceNode::board(2, 2)),
        SourceNode::assign(
            "pawn",
            SourceNode::piece(vec![
                ("name", SourceNode::string("P")),
                ("start", SourceNode::position(1, 1)),
            ]),
        ),
    ]
}

#[test]
fn test_whole_program() {
    let program = compile_tree(&SourceNode::start(vec![
        SourceNode::assign("score", SourceNode::integer(5)),
        SourceNode::output(SourceNode::ident("score")),
    ]))
    .unwrap();

    expect![[r#"
        /* === Code generated by Griddy compiler === */
        #include <limits.h>
        #include <stdio.h>
        #include <stdlib.h>
        #include <string.h>

        int main(int argc, char *argv[]){
        struct Piece { char* name; unsigned int limit; unsigned int count; int capture; int placeable; int can_jump; };
        struct Piece empty_piece;
        empty_piece.name = calloc(2, sizeof(char));
        strcpy(empty_piece.name, " ");
        empty_piece.limit = 0;
        empty_piece.count = 0;
        empty_piece.capture = 0;
        empty_piece.placeable = 0;
        empty_piece.can_jump = 0;

        /*    SETUP    */
        int score = 5;
        printf("%d\n", score);
        /*    GAME    */
        int griddy_round = 5;
        do {
        } while (0 < griddy_round--);

        return 0;
        }
    "#]]
    .assert_eq(&program);
}

#[test]
fn test_setup_with_mirrored_pieces() {
    let program = compile_tree(&SourceNode::start(pawn_on_small_board())).unwrap();

    expect![[r#"
        struct Piece *board[2][2];
        for (int y = 0; y < 2; y++)
        for (int x = 0; x < 2; x++)
        board[y][x] = &empty_piece;
        struct Piece pawn;
        pawn.name = calloc(2, sizeof(char));
        strcpy(pawn.name, "P");
        pawn.limit = UINT_MAX;
        pawn.capture = 0;
        pawn.placeable = 1;
        pawn.can_jump = 0;
        pawn.count = 0;
        struct Piece pawn_p1;
        pawn_p1.name = calloc(2, sizeof(char));
        strcpy(pawn_p1.name, "P");
        pawn_p1.limit = UINT_MAX;
        pawn_p1.count = 1;
        pawn_p1.capture = 0;
        pawn_p1.placeable = 1;
        pawn_p1.can_jump = 0;
        struct Piece pawn_p2;
        pawn_p2.name = calloc(2, sizeof(char));
        strcpy(pawn_p2.name, "P");
        pawn_p2.limit = UINT_MAX;
        pawn_p2.count = 1;
        pawn_p2.capture = 0;
        pawn_p2.placeable = 1;
        pawn_p2.can_jump = 0;
        board[0][0] = &pawn_p1;
        board[1][0] = &pawn_p2;
    "#]]
    .assert_eq(setup_section(&program).unwrap());
}

#[test]
fn test_game_with_placement_and_access() {
    let mut statements = pawn_on_small_board();
    statements.push(SourceNode::game(vec![
        SourceNode::place("pawn", "board", SourceNode::integer(1), SourceNode::integer(2)),
        SourceNode::output(SourceNode::access(
            SourceNode::integer(1),
            SourceNode::integer(2),
            "board",
        )),
    ]));
    let program = compile_tree(&SourceNode::start(statements)).unwrap();

    expect![[r#"
        int griddy_round = 5;
        do {
        if (pawn.count < pawn.limit) {
        board[2-1][1-1] = &pawn;
        pawn.count++;
        }
        printf("%s\n", (*board[2-1][1-1]).name);
        } while (0 < griddy_round--);
    "#]]
    .assert_eq(game_section(&program).unwrap());
}

#[test]
fn test_custom_win_condition() {
    let source = SourceNode::start(vec![
        SourceNode::assign("turns", SourceNode::integer(0)),
        SourceNode::game(vec![SourceNode::assign(
            "turns",
            SourceNode::expr(vec![
                SourceNode::ident("turns"),
                SourceNode::operator("+"),
                SourceNode::integer(1),
            ]),
        )]),
    ]);
    let ast = Ast::from_source(&source).unwrap();
    let mut structure = GriddyStructure::new(&CodegenConfig::default());
    collect(&ast, &mut structure).unwrap();
    structure.game.win_condition = WinCondition::Condition("turns < 3".to_string());

    let program = CBackend::new(&ast, structure).lower().unwrap();
    expect![[r#"
        do {
        turns = (turns+1);
        } while (turns < 3);
    "#]]
    .assert_eq(game_section(&program).unwrap());
}
