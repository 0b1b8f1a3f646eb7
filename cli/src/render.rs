use common::{Board, Ring, NR_PEGS};

const PEG_GAP: &str = "  ";

/// Draw the board as rows of ring blocks, one column per peg, widest ring
/// at the bottom. A ring of size `s` is `2s + 1` characters wide, so every
/// column is sized for the largest ring of the game.
pub fn render_board(board: &Board, rings: Ring) -> String {
    let rings = rings as usize;
    let width = 2 * rings + 1;
    let mut out = String::new();

    for level in (0..rings).rev() {
        for (idx, peg) in board.pegs().iter().enumerate() {
            if idx > 0 {
                out.push_str(PEG_GAP);
            }
            match peg.get(level) {
                Some(&ring) => {
                    let pad = rings - ring as usize;
                    out.push_str(&" ".repeat(pad));
                    out.push_str(&"=".repeat(2 * ring as usize + 1));
                    out.push_str(&" ".repeat(pad));
                }
                None => {
                    out.push_str(&" ".repeat(rings));
                    out.push('|');
                    out.push_str(&" ".repeat(rings));
                }
            }
        }
        out.push('\n');
    }

    out.push_str(&"-".repeat(NR_PEGS * width + (NR_PEGS - 1) * PEG_GAP.len()));
    out.push('\n');

    for idx in 0..NR_PEGS {
        if idx > 0 {
            out.push_str(PEG_GAP);
        }
        out.push_str(&" ".repeat(rings));
        out.push_str(&idx.to_string());
        out.push_str(&" ".repeat(rings));
    }
    out.push('\n');

    out
}
