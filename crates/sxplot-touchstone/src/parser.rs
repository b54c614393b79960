//! Interprets lexed Touchstone lines and builds a [`Network`].
//!
//! Lines are classified by their first significant token: `#` starts the
//! option line, a bracketed keyword starts a keyword line and anything else
//! is network data. Data values are collected into one flat stream and cut
//! into records afterwards, so records may wrap across lines freely.

use log::{debug, trace, warn};
use num_complex::Complex64;

use sxplot_core::catalog::FrequencyUnit;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    network::Network,
    options::{DataFormat, OptionLine, TwoPortOrder, matrix_position},
    span::Span,
    tokens::{PositionedToken, Token},
};

type Line<'t, 'src> = Vec<&'t PositionedToken<'src>>;

/// Splits tokens at newlines, keeping whitespace out of every line.
fn split_lines<'t, 'src>(tokens: &'t [PositionedToken<'src>]) -> Vec<Line<'t, 'src>> {
    let mut lines = vec![Vec::new()];
    for token in tokens {
        match token.token {
            Token::Newline => lines.push(Vec::new()),
            Token::Whitespace => {}
            _ => {
                if let Some(line) = lines.last_mut() {
                    line.push(token);
                }
            }
        }
    }
    lines
}

/// Accumulated state of a single pass over the file.
struct Reader {
    diagnostics: DiagnosticCollector,
    options: OptionLine,
    option_line: Option<Span>,
    declared_ports: Option<(usize, Span)>,
    order: TwoPortOrder,
    comments: Vec<String>,
    values: Vec<(f64, Span)>,
    data_ended: bool,
}

impl Reader {
    fn new() -> Self {
        Self {
            diagnostics: DiagnosticCollector::new(),
            options: OptionLine::default(),
            option_line: None,
            declared_ports: None,
            order: TwoPortOrder::default(),
            comments: Vec::new(),
            values: Vec::new(),
            data_ended: false,
        }
    }

    fn read_line(&mut self, line: &[&PositionedToken<'_>]) {
        let mut significant = Vec::with_capacity(line.len());
        for token in line {
            match token.token {
                Token::Comment(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        self.comments.push(text.to_string());
                    }
                }
                _ => significant.push(*token),
            }
        }

        let Some((first, rest)) = significant.split_first() else {
            return;
        };
        if self.data_ended {
            return;
        }

        match first.token {
            Token::Hash => self.read_option_line(first.span, rest),
            Token::Keyword(name) => self.read_keyword(name, first.span, rest),
            _ => self.read_data(&significant),
        }
    }

    fn read_option_line(&mut self, hash: Span, rest: &[&PositionedToken<'_>]) {
        let line_span = rest.last().map_or(hash, |last| hash.union(last.span));

        if let Some(first) = self.option_line {
            self.diagnostics.emit(
                Diagnostic::warning("duplicate option line")
                    .with_code(ErrorCode::E006)
                    .with_label(line_span, "ignored")
                    .with_secondary_label(first, "first option line"),
            );
            return;
        }
        self.option_line = Some(line_span);

        let mut options = OptionLine::default();
        let mut index = 0;
        while index < rest.len() {
            let token = rest[index];
            index += 1;

            match token.token {
                Token::Word(word) => {
                    let lower = word.to_ascii_lowercase();
                    if let Some(unit) = FrequencyUnit::from_alias(&lower) {
                        options.unit = unit;
                    } else if let Some(format) = DataFormat::from_option(word) {
                        options.format = format;
                    } else if lower == "s" {
                        // Scattering parameters, the only supported type
                    } else if matches!(lower.as_str(), "y" | "z" | "h" | "g") {
                        self.diagnostics.emit(
                            Diagnostic::error(format!("unsupported parameter type `{word}`"))
                                .with_code(ErrorCode::E004)
                                .with_label(token.span, "only S-parameters can be plotted")
                                .with_help("export the measurement as S-parameters"),
                        );
                    } else if lower == "r" {
                        match rest.get(index).map(|next| &next.token) {
                            Some(Token::Number(impedance)) => {
                                options.reference_impedance = *impedance;
                                index += 1;
                            }
                            _ => self.diagnostics.emit(
                                Diagnostic::error("missing reference impedance")
                                    .with_code(ErrorCode::E005)
                                    .with_label(token.span, "expected a number after `R`")
                                    .with_help("write the impedance in ohms, e.g. `R 50`"),
                            ),
                        }
                    } else {
                        self.diagnostics.emit(
                            Diagnostic::error(format!("unknown option `{word}`"))
                                .with_code(ErrorCode::E003)
                                .with_label(token.span, ErrorCode::E003.description())
                                .with_help(
                                    "options are a frequency unit (Hz, kHz, MHz, GHz, THz), \
                                     a parameter type (S), a format (RI, MA, DB) and `R <ohms>`",
                                ),
                        );
                    }
                }
                _ => self.diagnostics.emit(
                    Diagnostic::error(format!("unexpected {} on the option line", token.token))
                        .with_code(ErrorCode::E001)
                        .with_label(token.span, ErrorCode::E001.description()),
                ),
            }
        }

        trace!(options:?; "Option line read");
        self.options = options;
    }

    fn read_keyword(&mut self, name: &str, span: Span, args: &[&PositionedToken<'_>]) {
        let args_span = args
            .iter()
            .fold(span, |acc, token| acc.union(token.span));

        match name.to_ascii_lowercase().as_str() {
            "number of ports" => match args {
                [arg] => match arg.token {
                    Token::Number(n) if n >= 1.0 && n.fract() == 0.0 => {
                        self.declared_ports = Some((n as usize, args_span));
                    }
                    _ => self.invalid_port_count(args_span),
                },
                _ => self.invalid_port_count(args_span),
            },
            "two-port data order" => {
                let order = match args {
                    [arg] => match arg.token {
                        Token::Word(value) => TwoPortOrder::from_keyword_value(value),
                        _ => None,
                    },
                    _ => None,
                };
                match order {
                    Some(order) => self.order = order,
                    None => self.diagnostics.emit(
                        Diagnostic::error("invalid two-port data order")
                            .with_code(ErrorCode::E202)
                            .with_label(args_span, ErrorCode::E202.description())
                            .with_help("use `12_21` or `21_12`"),
                    ),
                }
            }
            "noise data" | "end" => {
                debug!(keyword = name; "Network data ends");
                self.data_ended = true;
            }
            other => debug!(keyword = other; "Ignoring keyword"),
        }
    }

    fn invalid_port_count(&mut self, span: Span) {
        self.diagnostics.emit(
            Diagnostic::error("invalid number of ports")
                .with_code(ErrorCode::E201)
                .with_label(span, ErrorCode::E201.description())
                .with_help("write a positive integer, e.g. `[Number of Ports] 4`"),
        );
    }

    fn read_data(&mut self, tokens: &[&PositionedToken<'_>]) {
        for token in tokens {
            match token.token {
                Token::Number(value) => self.values.push((value, token.span)),
                _ => self.diagnostics.emit(
                    Diagnostic::error(format!("unexpected {} in network data", token.token))
                        .with_code(ErrorCode::E100)
                        .with_label(token.span, "data lines hold numbers only")
                        .with_help("comments start with `!`"),
                ),
            }
        }
    }

    /// The port count and the number of values in one record.
    fn resolve_ports(&mut self, hint: Option<usize>) -> Option<(usize, usize)> {
        let hint = hint.filter(|ports| *ports > 0);
        let ports = match (self.declared_ports, hint) {
            (Some((declared, _)), Some(hint)) if declared != hint => {
                warn!(declared, hint; "Declared port count overrides the file extension");
                declared
            }
            (Some((declared, _)), _) => declared,
            (None, Some(hint)) => hint,
            (None, None) => {
                self.diagnostics.emit(
                    Diagnostic::error("unknown port count")
                        .with_code(ErrorCode::E200)
                        .with_label(Span::new(0..0), ErrorCode::E200.description())
                        .with_help(
                            "name the file with a `.sNp` extension or add `[Number of Ports]`",
                        ),
                );
                return None;
            }
        };

        if let Some(len) = record_len(ports) {
            return Some((ports, len));
        }
        let diagnostic = match self.declared_ports {
            Some((_, span)) => Diagnostic::error(format!("{ports} ports is too many"))
                .with_code(ErrorCode::E201)
                .with_label(span, ErrorCode::E201.description()),
            None => Diagnostic::error(format!("{ports} ports is too many"))
                .with_code(ErrorCode::E200)
                .with_label(Span::new(0..0), "port count taken from the file extension"),
        };
        self.diagnostics.emit(diagnostic);
        None
    }

    fn finish(mut self, hint: Option<usize>) -> Result<Network, ParseError> {
        let Some((ports, record_len)) = self.resolve_ports(hint) else {
            return Err(self.diagnostics.into_error());
        };

        let multiplier = self.options.unit.multiplier();
        let mut frequencies: Vec<f64> = Vec::new();
        let mut matrices = Vec::new();

        let mut cursor = 0;
        while cursor < self.values.len() {
            let frequency = self.values[cursor].0 * multiplier;

            // 2-port noise parameters follow the network data, restarting
            // at a frequency no higher than the last one
            if ports == 2 && frequencies.last().is_some_and(|last| frequency <= *last) {
                debug!(
                    frequency,
                    skipped_values = self.values.len() - cursor;
                    "Noise parameter block skipped"
                );
                break;
            }

            let remaining = &self.values[cursor..];
            if remaining.len() < record_len {
                let span = remaining[0].1.union(remaining[remaining.len() - 1].1);
                let mut diagnostic = Diagnostic::error("incomplete data record")
                    .with_code(ErrorCode::E101)
                    .with_label(
                        span,
                        format!("{} of {record_len} values", remaining.len()),
                    )
                    .with_help(format!(
                        "a {ports}-port record holds the frequency followed by {} value pairs",
                        ports * ports
                    ));
                if let Some((_, declared)) = self.declared_ports {
                    diagnostic = diagnostic.with_secondary_label(declared, "port count set here");
                }
                self.diagnostics.emit(diagnostic);
                break;
            }

            let mut matrix = vec![Complex64::default(); ports * ports];
            for (k, pair) in remaining[1..record_len].chunks_exact(2).enumerate() {
                let (row, col) = matrix_position(k, ports, self.order);
                matrix[row * ports + col] = self.options.format.decode(pair[0].0, pair[1].0);
            }

            frequencies.push(frequency);
            matrices.push(matrix);
            cursor += record_len;
        }

        self.diagnostics.finish()?;

        debug!(ports, points = frequencies.len(); "Network data read");
        let mut network = Network::new(
            ports,
            self.options.reference_impedance,
            frequencies,
            matrices,
        )
        .map_err(|err| ParseError::from(Diagnostic::error(err.to_string())))?;
        network.set_comments(self.comments);
        Ok(network)
    }
}

/// Builds a network from the lexed tokens of one file.
///
/// `ports` is the port count implied by the file name; a `[Number of Ports]`
/// keyword takes precedence over it.
pub(crate) fn build_network(
    tokens: &[PositionedToken<'_>],
    ports: Option<usize>,
) -> Result<Network, ParseError> {
    let mut reader = Reader::new();
    for line in split_lines(tokens) {
        reader.read_line(&line);
    }
    reader.finish(ports)
}

/// Frequency plus one complex pair per matrix entry, if that fits in `usize`.
fn record_len(ports: usize) -> Option<usize> {
    ports.checked_mul(ports)?.checked_mul(2)?.checked_add(1)
}
