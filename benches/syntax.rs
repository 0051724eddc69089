//! Benchmarks for LaTeX highlighting performance
//!
//! Run with: cargo bench --bench syntax

use texpad::syntax::Highlighter;
use texpad::theme::HighlightTheme;
use texpad::Document;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const LATEX_SAMPLE: &str = r#"\documentclass[11pt]{article}
\usepackage{amsmath}
% Preamble done
\begin{document}
\section{Introduction}
Let $f(x) = x^2$ and consider the integral
\[ \int_0^1 f(x)\,dx = \frac{1}{3} \]
which follows from \cite{calculus}.
\begin{itemize}
  \item[a)] first point % with a note
  \item second point
\end{itemize}
\end{document}
"#;

fn generate_large_latex(lines: usize) -> String {
    LATEX_SAMPLE.lines().cycle().take(lines).collect::<Vec<_>>().join("\n")
}

fn latex() -> Highlighter {
    Highlighter::latex(HighlightTheme::default()).unwrap()
}

#[divan::bench]
fn highlight_sample(bencher: divan::Bencher) {
    let highlighter = latex();
    let document = Document::with_text(LATEX_SAMPLE);
    bencher.bench_local(|| divan::black_box(highlighter.highlight_document(&document)));
}

#[divan::bench(args = [100, 1000, 5000])]
fn highlight_large_document(bencher: divan::Bencher, lines: usize) {
    let highlighter = latex();
    let document = Document::with_text(&generate_large_latex(lines));
    bencher.bench_local(|| divan::black_box(highlighter.highlight_document(&document)));
}

#[divan::bench]
fn highlight_single_changed_line(bencher: divan::Bencher) {
    let highlighter = latex();
    let line = r"\item[a)] $x_1 + x_2$ \textbf{bold} {braces} % comment";
    bencher.bench_local(|| divan::black_box(highlighter.highlight_line(line)));
}

#[divan::bench]
fn raw_spans_single_line(bencher: divan::Bencher) {
    let highlighter = latex();
    let line = r"\begin{equation} \[ a \] $b$ \end{equation}";
    bencher.bench_local(|| divan::black_box(highlighter.spans(line)));
}
