//! Example of compiling several outputs into one netlist and rendering it.
use std::{fs::File, io::BufWriter};

use logicrs::compiler::{CompileOptions, Compiler};
use logicrs::minimizer::CoverStrategy;

fn main() {
    let options = CompileOptions::builder().cover(CoverStrategy::Greedy).build();
    let compiler = Compiler::new(options);

    let combined = compiler
        .compile_combined(&[("X", "A*B*C"), ("Y", "(A+B)'D"), ("Z", "A^E^F")])
        .unwrap();
    println!("{combined}");
    println!("{}", combined.netlist.to_json().unwrap());

    let path = "netlist.dot";
    let f = File::create(path).unwrap();
    let mut b = BufWriter::new(f);
    combined
        .netlist
        .draw("combined", &mut b as &mut dyn std::io::Write)
        .unwrap();
    println!("Rendered netlist to '{path}'");

    let recovered = compiler.compile_minterms("W", "1, 3, 5, 7").unwrap();
    println!("{recovered}");
}
