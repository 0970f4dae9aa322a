//! Plain-text rendering of the dashboard and record listings.

use std::fmt::Write;

use carteira_core::{Dashboard, GroupSummary, format_brl, format_percent, progress_bar};

const NAME_WIDTH: usize = 24;

pub fn render_dashboard(d: &Dashboard, bar_width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Dashboard: {}\n", d.window.label_pt());

    if d.is_empty() {
        let _ = writeln!(out, "Nenhum lançamento em {}.", d.window.label_pt());
        return out;
    }

    let t = &d.totals;
    let _ = writeln!(out, "{:<12}{:>16}", "Receitas", format_brl(t.total_income));
    let _ = writeln!(out, "{:<12}{:>16}", "Despesas", format_brl(t.total_expense));
    let _ = writeln!(out, "{:<12}{:>16}", "Investido", format_brl(t.total_invested));
    let _ = writeln!(out, "{:<12}{:>16}", "Saldo", format_brl(t.balance));
    if t.total_income > 0.0 {
        let _ = writeln!(out, "{:<12}{:>16}", "Poupança", format_percent(t.savings_rate()));
    }

    share_section(&mut out, "Despesas por categoria", &d.by_category, bar_width);
    if d.orphaned_expenses > 0 {
        let _ = writeln!(
            out,
            "({} despesa(s) com categoria desconhecida, fora dos grupos)",
            d.orphaned_expenses
        );
    }
    share_section(&mut out, "Despesas por conta", &d.by_debit_source, bar_width);
    share_section(&mut out, "Receitas por tipo", &d.by_income_type, bar_width);
    goal_section(&mut out, "Metas de investimento", &d.by_investment_type, bar_width);

    out
}

/// Groups whose percentage is a share of the month's total.
fn share_section<R>(out: &mut String, title: &str, groups: &[GroupSummary<R>], bar_width: usize) {
    if groups.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n## {}", title);
    for g in groups {
        let _ = writeln!(
            out,
            "{:<w$} {:>16} {:>8}  {}",
            truncate(&g.name, NAME_WIDTH),
            format_brl(g.total),
            format_percent(g.percentage),
            progress_bar(g.bar_fraction(), bar_width),
            w = NAME_WIDTH,
        );
    }
}

/// Groups measured against their own target.
pub fn goal_section<R>(out: &mut String, title: &str, groups: &[GroupSummary<R>], bar_width: usize) {
    if groups.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n## {}", title);
    for g in groups {
        let target = g.target.unwrap_or(0.0);
        let _ = write!(
            out,
            "{:<w$} {:>16} / {:<16} {:>8}  {}",
            truncate(&g.name, NAME_WIDTH),
            format_brl(g.total),
            format_brl(target),
            format_percent(g.percentage),
            progress_bar(g.bar_fraction(), bar_width),
            w = NAME_WIDTH,
        );
        if g.is_target_reached() {
            let _ = write!(out, "  meta atingida");
        } else if let Some(left) = g.remaining().filter(|r| *r > 0.0) {
            let _ = write!(out, "  faltam {}", format_brl(left));
        }
        out.push('\n');
    }
}

/// One line per record: id, date, name column, amount.
pub fn record_line(id: i64, date: Option<chrono::NaiveDate>, label: &str, value: f64) -> String {
    let date = date
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default();
    format!(
        "{:>6}  {:<10}  {:<w$} {:>16}",
        id,
        date,
        truncate(label, NAME_WIDTH),
        format_brl(value),
        w = NAME_WIDTH,
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
    t.push('…');
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use carteira_core::{
        DashboardInput, Debited, Expense, ExpenseCategory, IncomeType, Investment,
        InvestmentType, MonthWindow, UserIncome,
    };
    use chrono::NaiveDate;

    fn sample() -> Dashboard {
        let w = MonthWindow::new(2026, 3).unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let mut input = DashboardInput::new(w);
        input.categories = vec![ExpenseCategory::new(1, "Alimentação")];
        input.debit_sources = vec![Debited::new(7, "Nubank")];
        input.expenses = vec![
            Expense::new(1, "Mercado", 300.0, day, 1).with_debited(7),
            Expense::new(2, "?", 100.0, day, 42),
        ];
        input.income_types = vec![IncomeType::new(1, "Salário")];
        input.incomes = vec![UserIncome::new(1, 1, 2000.0, day)];
        input.investment_types = vec![
            InvestmentType::new(3, "Reserva", 1000.0),
            InvestmentType::new(4, "Viagem", 100.0),
        ];
        input.investments = vec![
            Investment::new(1, "CDB", 250.0, day, 3),
            Investment::new(2, "Tesouro", 150.0, day, 4),
        ];
        Dashboard::build(&input)
    }

    #[test]
    fn test_dashboard_text() {
        let text = render_dashboard(&sample(), 10);

        assert!(text.starts_with("# Dashboard: março de 2026"));
        assert!(text.contains("R$ 2.000,00"));
        assert!(text.contains("R$ 1.200,00"), "balance is 2000 - 400 - 400");
        assert!(text.contains("## Despesas por categoria"));
        assert!(text.contains("75,0%"));
        assert!(text.contains("1 despesa(s) com categoria desconhecida"));
        assert!(text.contains("faltam R$ 750,00"));
        assert!(text.contains("150,0%"));
        assert!(text.contains("meta atingida"));
    }

    #[test]
    fn test_bars_stay_bounded() {
        let text = render_dashboard(&sample(), 10);
        let viagem = text.lines().find(|l| l.starts_with("Viagem")).unwrap();
        assert!(viagem.contains(&"█".repeat(10)));
        assert!(!viagem.contains(&"█".repeat(11)));
    }

    #[test]
    fn test_empty_month() {
        let d = Dashboard::build(&DashboardInput::new(MonthWindow::new(2026, 1).unwrap()));
        let text = render_dashboard(&d, 10);
        assert!(text.contains("Nenhum lançamento em janeiro de 2026."));
        assert!(!text.contains("##"));
    }

    #[test]
    fn test_goals_shown_in_month_without_records() {
        let mut input = DashboardInput::new(MonthWindow::new(2026, 4).unwrap());
        input.investment_types = vec![InvestmentType::new(1, "Reserva", 1000.0)];
        let text = render_dashboard(&Dashboard::build(&input), 10);

        assert!(!text.contains("Nenhum lançamento"));
        assert!(text.contains("## Metas de investimento"));
        let reserva = text.lines().find(|l| l.starts_with("Reserva")).unwrap();
        assert!(reserva.contains("0,0%"));
        assert!(reserva.contains("faltam R$ 1.000,00"));
        assert!(reserva.contains(&"░".repeat(10)));
    }

    #[test]
    fn test_record_line() {
        let line = record_line(
            12,
            NaiveDate::from_ymd_opt(2026, 3, 5),
            "Uma descrição bem comprida demais para a coluna",
            -35.5,
        );
        assert!(line.contains("05/03/2026"));
        assert!(line.contains('…'));
        assert!(line.ends_with("-R$ 35,50"));
    }
}
