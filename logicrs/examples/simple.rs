//! Example of minimizing a few expressions stage by stage.
use logicrs::{
    minimizer::{find_prime_implicants, format, maxterms, truth_table},
    parser::parse,
};

fn main() {
    for expression in ["A+B", "A*B+C'", "AB'C + A'BC' + ABC' + AB'C'"] {
        let tree = parse(expression).unwrap();

        let minterms = truth_table(Some(&tree));
        let sop = format::sop(&find_prime_implicants(&minterms).unwrap());

        let maxterms = maxterms(Some(&tree));
        let pos = format::pos(&find_prime_implicants(&maxterms).unwrap());

        assert_eq!(minterms.len() + maxterms.len(), 64);
        println!("{expression}:\n  SOP: {sop}\n  POS: {pos}\n");
    }

    // A*B+C' at A=1, B=0, C=1 is Low.
    assert!(!parse("A*B+C'").unwrap().evaluate(0b101));
}
