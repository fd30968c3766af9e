use tracing::{debug, instrument, warn};

use crate::ast::LogicNode;
use crate::compiler::{Analysis, ChannelAnalysis, CombinedAnalysis, CompileOptions};
use crate::error::{CompileError, NetlistError, Result};
use crate::minimizer::{
    find_prime_implicants, format, maxterms, select_cover, truth_table, ImplicantList,
    TruthTable, DOMAIN,
};
use crate::netlist::{self, MAX_OUTPUTS};
use crate::parser::parse;
use crate::program::parse_minterm_csv;

/// Runs the whole pipeline for expressions or minterm lists. Every call
/// recompiles from its input; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    #[must_use]
    pub fn new(options: CompileOptions) -> Self {
        Compiler { options }
    }

    #[must_use]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    fn parse(expression: &str) -> Result<LogicNode> {
        parse(expression).map_err(|source| CompileError::Parse {
            expression: expression.to_owned(),
            source,
        })
    }

    fn minimize(&self, table: &TruthTable) -> Result<ImplicantList> {
        let mut primes = find_prime_implicants(table)?;
        select_cover(&mut primes, table, self.options.cover);
        Ok(primes)
    }

    fn analyze_expression(&self, label: &str, expression: String) -> Result<Analysis> {
        let tree = Compiler::parse(&expression)?;
        let minterms = truth_table(Some(&tree));
        let maxterms = maxterms(Some(&tree));
        self.analyze(label, expression, Some(tree), &minterms, &maxterms)
    }

    fn analyze(
        &self,
        label: &str,
        expression: String,
        tree: Option<LogicNode>,
        minterms: &TruthTable,
        maxterms: &TruthTable,
    ) -> Result<Analysis> {
        let sop = format::sop(&self.minimize(minterms)?);
        let pos = format::pos(&self.minimize(maxterms)?);

        let netlist = netlist::generate(label, tree.as_ref());
        let json_bytes = netlist.check_capacity(self.options.netlist_capacity)?;

        debug!(%sop, %pos, minterms = minterms.len(), json_bytes, "analyzed output");
        Ok(Analysis {
            label: label.to_owned(),
            expression,
            sop,
            pos,
            minterms: minterms.to_vec(),
            maxterms: maxterms.to_vec(),
            netlist,
            tree,
        })
    }

    /// Compile `expression` into its minimized forms, minterms, maxterms,
    /// and the netlist of an output named `label`.
    ///
    /// # Errors
    /// Returns an error if the expression does not parse, the minimizer
    /// runs out of capacity, or the netlist exceeds
    /// [`CompileOptions::netlist_capacity`].
    #[instrument(skip(self), err)]
    pub fn compile(&self, label: &str, expression: &str) -> Result<Analysis> {
        self.analyze_expression(label, expression.to_owned())
    }

    /// Compile up to four labelled channels into per-channel minterms and
    /// one netlist with a shared id space. Channels that do not parse are
    /// skipped with a warning.
    ///
    /// # Errors
    /// Returns an error if more than four channels are given, or the
    /// netlist exceeds [`CompileOptions::combined_netlist_capacity`].
    #[instrument(skip_all, fields(channels = channels.len()), err)]
    pub fn compile_combined(&self, channels: &[(&str, &str)]) -> Result<CombinedAnalysis> {
        if channels.len() > MAX_OUTPUTS {
            return Err(NetlistError::TooManyOutputs {
                limit: MAX_OUTPUTS,
                got: channels.len(),
            }
            .into());
        }

        let trees = channels
            .iter()
            .map(|(label, expression)| match Compiler::parse(expression) {
                Ok(tree) => Some(tree),
                Err(err) => {
                    warn!(label, %err, "skipping channel");
                    None
                }
            })
            .collect::<Vec<_>>();

        let outputs = channels
            .iter()
            .zip(&trees)
            .map(|((label, _), tree)| (*label, tree.as_ref()))
            .collect::<Vec<_>>();
        let netlist = netlist::generate_combined(&outputs)?;
        let json_bytes = netlist.check_capacity(self.options.combined_netlist_capacity)?;
        debug!(json_bytes, "combined netlist fits");

        let channels = channels
            .iter()
            .zip(&trees)
            .map(|((label, expression), tree)| ChannelAnalysis {
                label: (*label).to_owned(),
                expression: (*expression).to_owned(),
                valid: tree.is_some(),
                minterms: truth_table(tree.as_ref()).to_vec(),
            })
            .collect();

        Ok(CombinedAnalysis { channels, netlist })
    }

    /// Recover an equation from a comma-separated minterm list and compile
    /// it, so the result carries the POS form and netlist as well.
    /// Constant functions have no gates and get an empty netlist.
    ///
    /// # Errors
    /// Returns an error if the minimizer runs out of capacity or the
    /// netlist exceeds [`CompileOptions::netlist_capacity`].
    #[instrument(skip(self), err)]
    pub fn compile_minterms(&self, label: &str, csv: &str) -> Result<Analysis> {
        let minterms = parse_minterm_csv(csv);
        let sop = format::sop(&self.minimize(&minterms)?);

        if minterms.is_empty() || minterms.len() == DOMAIN {
            debug!(%sop, "minterms describe a constant function");
            return self.analyze(label, sop, None, &minterms, &minterms.complement());
        }

        self.analyze_expression(label, sop)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::Compiler;
    use crate::compiler::CompileOptions;
    use crate::error::{CompileError, NetlistError, ParseError};
    use crate::netlist::NodeKind;

    #[test]
    fn compiles_expression() {
        let compiler = Compiler::default();
        let analysis = compiler.compile("X", "A+B").unwrap();

        assert_eq!(analysis.sop, "A + B");
        assert_eq!(analysis.pos, "(A + B)");
        assert_eq!(analysis.minterms.len() + analysis.maxterms.len(), 64);
        assert_eq!(analysis.maxterms.first(), Some(&0));
        assert!(analysis.tree.is_some());
        assert_eq!(
            analysis
                .netlist
                .nodes()
                .filter(|(_, _, kind)| *kind == NodeKind::Output)
                .count(),
            1
        );
    }

    #[test]
    fn rejects_invalid_expression() {
        let compiler = Compiler::default();
        match compiler.compile("X", "A*") {
            Err(CompileError::Parse { expression, source }) => {
                assert_eq!(expression, "A*");
                assert_eq!(
                    source,
                    ParseError::MissingOperand {
                        operator: '*',
                        position: 1
                    }
                );
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(compiler.compile("X", "").is_err());
    }

    #[test]
    fn enforces_netlist_capacity() {
        let compiler = Compiler::new(CompileOptions::builder().netlist_capacity(32).build());
        assert!(matches!(
            compiler.compile("X", "A*B + C*D"),
            Err(CompileError::Netlist(NetlistError::CapacityExceeded {
                capacity: 32,
                ..
            }))
        ));

        let exact = Compiler::new(CompileOptions::default())
            .compile("X", "A*B + C*D")
            .unwrap()
            .netlist
            .to_json()
            .unwrap()
            .len();
        let compiler = Compiler::new(CompileOptions::builder().netlist_capacity(exact).build());
        assert!(compiler.compile("X", "A*B + C*D").is_ok());

        let compiler = Compiler::new(
            CompileOptions::builder()
                .combined_netlist_capacity(exact - 1)
                .build(),
        );
        assert!(matches!(
            compiler.compile_combined(&[("X", "A*B + C*D")]),
            Err(CompileError::Netlist(NetlistError::CapacityExceeded { .. }))
        ));
    }

    #[test]
    fn rejects_deep_expressions() {
        let compiler = Compiler::new(CompileOptions::default());
        let expression = vec!["A"; 10_000].join("+");
        assert!(matches!(
            compiler.compile("X", &expression),
            Err(CompileError::Parse {
                source: ParseError::TooDeep { .. },
                ..
            })
        ));
    }

    #[test]
    fn combined_skips_invalid_channels() {
        let compiler = Compiler::default();
        let combined = compiler
            .compile_combined(&[("X", "A*B"), ("Y", "A+("), ("Z", "C'"), ("W", "")])
            .unwrap();

        let valid = combined
            .channels
            .iter()
            .map(|channel| (channel.label.as_str(), channel.valid))
            .collect::<Vec<_>>();
        assert_eq!(valid, vec![("X", true), ("Y", false), ("Z", true), ("W", false)]);
        assert!(combined.channels[1].minterms.is_empty());
        assert_eq!(combined.channels[2].minterms.len(), 32);

        let outputs = combined
            .netlist
            .nodes()
            .filter(|(_, _, kind)| *kind == NodeKind::Output)
            .map(|(_, label, _)| label.to_owned())
            .collect::<Vec<_>>();
        assert_eq!(outputs, vec!["X", "Z"]);
    }

    #[test]
    fn combined_limits_channels() {
        let compiler = Compiler::default();
        let channels = [("X", "A"); 5];
        assert!(matches!(
            compiler.compile_combined(&channels),
            Err(CompileError::Netlist(NetlistError::TooManyOutputs { .. }))
        ));
    }

    #[test]
    fn minterms_round_trip_through_expression() {
        let compiler = Compiler::default();
        let original = compiler.compile("X", "A*B' + C^D").unwrap();
        let csv = original
            .minterms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let recovered = compiler.compile_minterms("X", &csv).unwrap();
        assert_eq!(recovered.minterms, original.minterms);
        assert_eq!(recovered.expression, recovered.sop);
        assert!(!recovered.netlist.is_empty());
    }

    #[test]
    fn constant_minterms() {
        let compiler = Compiler::default();

        let never = compiler.compile_minterms("X", "").unwrap();
        // Every combination is a maxterm.
        assert_eq!(never.sop, "0 (False)");
        assert_eq!(never.pos, "0 (False)");
        assert!(never.netlist.is_empty());
        assert!(never.tree.is_none());

        let csv = (0..64).map(|term| term.to_string()).collect::<Vec<_>>().join(",");
        let always = compiler.compile_minterms("X", &csv).unwrap();
        assert_eq!(always.sop, "1 (True)");
        assert_eq!(always.pos, "1 (True)");
        assert_eq!(always.maxterms, Vec::<u8>::new());
    }
}
