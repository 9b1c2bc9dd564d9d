//! Console command - an interactive dashboard session over stdin.
//!
//! Each line is one command. Errors are printed and the session carries on;
//! only `quit` or end of input ends it.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use plandesk::navigation::Section;
use plandesk::plans::{AppLimit, Plan, PlanDraft, PlanId, format_price, parse_price};
use plandesk::utils::parse_bool;
use plandesk::{Config, Dashboard};

use super::{plan_row, stats_lines};
use crate::cli::ConsoleArgs;

const HELP: &str = "\
Commands:
  login <email> <password>        sign in
  logout                          sign out, discarding any open edit
  go <section>                    overview, plans, users or settings
  list                            list plans
  show [id]                       show a plan, or the open edit
  create <name> <monthly> <yearly>
  toggle <id>                     flip a plan between active and inactive
  delete <id>                     delete a plan (asks first)
  edit <id>                       open a plan for editing
  set <field> <value>             name, description, monthly, yearly, maxapps, active
  feature add <text>              append a feature to the open edit
  feature rm <index>              remove a feature from the open edit
  commit                          save the open edit
  cancel                          discard the open edit
  stats                           overview statistics
  help                            this text
  quit                            leave the console";

pub async fn run(config: &Config, args: ConsoleArgs) -> Result<()> {
    let mut config = config.clone();
    if args.empty {
        config.catalog.seed = false;
    }
    let dashboard = Dashboard::from_config(&config)?;

    let stdin = io::stdin();
    let mut console = Console::new(dashboard, stdin.lock(), io::stdout());
    console.run().await
}

enum Flow {
    Continue,
    Quit,
}

/// A line-driven dashboard session.
pub struct Console<R, W> {
    dashboard: Dashboard,
    input: RefCell<R>,
    out: RefCell<W>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(dashboard: Dashboard, input: R, out: W) -> Self {
        Self {
            dashboard,
            input: RefCell::new(input),
            out: RefCell::new(out),
        }
    }

    /// Read and execute commands until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        self.line(&format!(
            "{} admin console. Type {} for commands.",
            "plandesk".cyan().bold(),
            "help".yellow()
        ))?;

        loop {
            self.prompt()?;
            let Some(line) = read_line(&self.input)? else {
                break;
            };
            match self.execute(&line).await {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => self.error(&format!("{:#}", err))?,
            }
        }

        self.line("Bye.")?;
        Ok(())
    }

    async fn execute(&mut self, line: &str) -> Result<Flow> {
        let (command, rest) = split_word(line.trim());

        match command {
            "" => {}
            "help" => self.line(HELP)?,
            "quit" | "exit" => return Ok(Flow::Quit),
            "login" => self.login(rest).await?,
            "logout" => self.logout()?,
            "go" => self.go(rest)?,
            "list" => self.list()?,
            "show" => self.show(rest)?,
            "create" => self.create(rest)?,
            "toggle" => self.toggle(parse_id(rest)?)?,
            "delete" => self.delete(parse_id(rest)?)?,
            "edit" => self.edit(parse_id(rest)?)?,
            "set" => self.set(rest)?,
            "feature" => self.feature(rest)?,
            "commit" => self.commit()?,
            "cancel" => self.cancel()?,
            "stats" => self.stats()?,
            other => bail!("unknown command '{}' (try 'help')", other),
        }

        Ok(Flow::Continue)
    }

    async fn login(&mut self, rest: &str) -> Result<()> {
        let mut parts = rest.split_whitespace();
        let (Some(email), Some(password)) = (parts.next(), parts.next()) else {
            bail!("usage: login <email> <password>");
        };

        self.info("Signing in...")?;
        if self.dashboard.login(email, password).await? {
            let who = self.dashboard.session().user_email().unwrap_or(email).to_string();
            self.success(&format!("Logged in as {}", who))
        } else {
            self.warning("Invalid email or password")
        }
    }

    fn logout(&mut self) -> Result<()> {
        if self.dashboard.logout() {
            self.success("Logged out")
        } else {
            self.warning("Not logged in")
        }
    }

    fn go(&mut self, rest: &str) -> Result<()> {
        let section: Section = rest.parse()?;
        self.dashboard.navigate(section)?;
        self.success(&format!("Now viewing {}", section.label()))
    }

    fn list(&self) -> Result<()> {
        let plans = self.dashboard.plans()?;
        if plans.is_empty() {
            return self.info("No plans yet. Use 'create' to add one.");
        }

        let mut out = self.out.borrow_mut();
        for plan in plans.list() {
            writeln!(out, "{}", plan_row(plan, plans.is_editing(plan.id)))?;
        }
        Ok(())
    }

    fn show(&self, rest: &str) -> Result<()> {
        let plans = self.dashboard.plans()?;

        if rest.is_empty() {
            let session = plans
                .editing()
                .context("usage: show <id> (or open an edit first)")?;
            let title = format!("Editing plan {}", session.plan_id());
            return self.show_draft(&title, session.draft());
        }

        let id = parse_id(rest)?;
        let plan = plans
            .get(id)
            .with_context(|| format!("plan not found: {}", id))?;
        self.show_plan(plan)
    }

    fn show_plan(&self, plan: &Plan) -> Result<()> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "{}", plan_row(plan, false))?;
        if !plan.description.is_empty() {
            writeln!(out, "     {}", plan.description.dimmed())?;
        }
        if let Some(savings) = plan.yearly_savings_percent() {
            writeln!(out, "     yearly billing saves {}%", savings)?;
        }
        write_features(&mut *out, &plan.features)
    }

    fn show_draft(&self, title: &str, draft: &PlanDraft) -> Result<()> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "{}", title.cyan().bold())?;
        writeln!(out, "  name:        {}", draft.name)?;
        writeln!(out, "  description: {}", draft.description)?;
        writeln!(out, "  monthly:     {}", format_price(draft.monthly_price_cents))?;
        writeln!(out, "  yearly:      {}", format_price(draft.yearly_price_cents))?;
        writeln!(out, "  max apps:    {}", draft.max_apps)?;
        writeln!(out, "  active:      {}", draft.is_active)?;
        write_features(&mut *out, &draft.features)
    }

    fn create(&mut self, rest: &str) -> Result<()> {
        let words: Vec<&str> = rest.split_whitespace().collect();
        if words.len() < 3 {
            bail!("usage: create <name> <monthly> <yearly>");
        }
        let (name, prices) = words.split_at(words.len() - 2);

        let draft = PlanDraft::new(name.join(" "))
            .monthly_price(parse_price("monthly_price", prices[0])?)
            .yearly_price(parse_price("yearly_price", prices[1])?);
        let id = self.dashboard.plans_mut()?.create(draft)?;

        self.success(&format!("Created plan {}", id))
    }

    fn toggle(&mut self, id: PlanId) -> Result<()> {
        let active = self.dashboard.plans_mut()?.toggle_active(id)?;
        let state = if active { "active" } else { "inactive" };
        self.success(&format!("Plan {} is now {}", id, state))
    }

    fn delete(&mut self, id: PlanId) -> Result<()> {
        let input = &self.input;
        let out = &self.out;
        let ask = |prompt: &str| {
            let asked = {
                let mut out = out.borrow_mut();
                match write!(out, "{} {} ", prompt, "[y/N]".dimmed()) {
                    Ok(()) => out.flush(),
                    Err(err) => Err(err),
                }
            };
            asked.is_ok() && matches!(read_line(input), Ok(Some(answer)) if is_yes(&answer))
        };

        if self.dashboard.plans_mut()?.delete(id, &ask)? {
            self.success(&format!("Deleted plan {}", id))
        } else {
            self.info("Kept the plan")
        }
    }

    fn edit(&mut self, id: PlanId) -> Result<()> {
        let name = self.dashboard.plans_mut()?.begin_edit(id)?.name.clone();
        self.info(&format!(
            "Editing '{}'. Change it with 'set' and 'feature', then 'commit' or 'cancel'.",
            name
        ))
    }

    fn set(&mut self, rest: &str) -> Result<()> {
        let (field, value) = split_word(rest);
        let draft = self
            .dashboard
            .plans_mut()?
            .draft_mut()
            .context("no plan is being edited (use 'edit <id>')")?;

        match field {
            "name" => draft.name = value.to_string(),
            "description" | "desc" => draft.description = value.to_string(),
            "monthly" => draft.monthly_price_cents = parse_price("monthly_price", value)?,
            "yearly" => draft.yearly_price_cents = parse_price("yearly_price", value)?,
            "maxapps" | "max_apps" | "apps" => draft.max_apps = parse_app_limit(value)?,
            "active" => {
                draft.is_active = parse_bool(value)
                    .with_context(|| format!("expected true or false, got '{}'", value))?
            }
            "" => bail!("usage: set <field> <value>"),
            other => bail!(
                "unknown field '{}' (name, description, monthly, yearly, maxapps, active)",
                other
            ),
        }

        self.success(&format!("Set {}", field))
    }

    fn feature(&mut self, rest: &str) -> Result<()> {
        let (action, arg) = split_word(rest);
        let plans = self.dashboard.plans_mut()?;
        if plans.editing().is_none() {
            bail!("no plan is being edited (use 'edit <id>')");
        }

        match action {
            "add" => {
                if plans.add_feature(arg) {
                    self.success("Feature added")
                } else {
                    self.warning("Nothing to add")
                }
            }
            "rm" | "remove" => {
                let index: usize = arg
                    .parse()
                    .with_context(|| format!("expected a feature index, got '{}'", arg))?;
                match plans.remove_feature(index)? {
                    Some(removed) => self.success(&format!("Removed '{}'", removed)),
                    None => self.warning("Nothing to remove"),
                }
            }
            _ => bail!("usage: feature add <text> | feature rm <index>"),
        }
    }

    fn commit(&mut self) -> Result<()> {
        match self.dashboard.plans_mut()?.commit_edit()? {
            Some(id) => self.success(&format!("Saved plan {}", id)),
            None => self.warning("No plan is being edited"),
        }
    }

    fn cancel(&mut self) -> Result<()> {
        if self.dashboard.plans_mut()?.cancel_edit() {
            self.info("Discarded changes")
        } else {
            self.warning("No plan is being edited")
        }
    }

    fn stats(&self) -> Result<()> {
        let stats = self.dashboard.stats()?;
        let mut out = self.out.borrow_mut();
        for line in stats_lines(&stats) {
            writeln!(out, "  {}", line)?;
        }
        Ok(())
    }

    fn prompt(&self) -> io::Result<()> {
        let mut out = self.out.borrow_mut();
        if self.dashboard.is_authenticated() {
            write!(out, "plandesk:{}> ", self.dashboard.section())?;
        } else {
            write!(out, "plandesk> ")?;
        }
        out.flush()
    }

    fn line(&self, message: &str) -> io::Result<()> {
        writeln!(self.out.borrow_mut(), "{}", message)
    }

    fn success(&self, message: &str) -> Result<()> {
        writeln!(self.out.borrow_mut(), "{} {}", "✓".green().bold(), message)?;
        Ok(())
    }

    fn info(&self, message: &str) -> Result<()> {
        writeln!(self.out.borrow_mut(), "{} {}", "→".blue(), message)?;
        Ok(())
    }

    fn warning(&self, message: &str) -> Result<()> {
        writeln!(self.out.borrow_mut(), "{} {}", "!".yellow().bold(), message)?;
        Ok(())
    }

    fn error(&self, message: &str) -> io::Result<()> {
        writeln!(self.out.borrow_mut(), "{} {}", "✗".red().bold(), message)
    }
}

fn read_line<R: BufRead>(input: &RefCell<R>) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.borrow_mut().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn write_features<W: Write>(out: &mut W, features: &[String]) -> Result<()> {
    for (index, feature) in features.iter().enumerate() {
        writeln!(out, "     [{}] {}", index, feature)?;
    }
    Ok(())
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn parse_id(s: &str) -> Result<PlanId> {
    s.parse()
        .with_context(|| format!("expected a plan id, got '{}'", s))
}

fn parse_app_limit(s: &str) -> Result<AppLimit> {
    if s.eq_ignore_ascii_case("unlimited") {
        return Ok(AppLimit::Unlimited);
    }
    let raw: i64 = s
        .parse()
        .with_context(|| format!("expected a number or 'unlimited', got '{}'", s))?;
    Ok(AppLimit::from_raw(raw)?)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use plandesk::plans::default_catalog;

    impl<R, W> Console<R, W> {
        fn into_parts(self) -> (Dashboard, W) {
            (self.dashboard, self.out.into_inner())
        }
    }

    async fn run_script(script: &str) -> (Dashboard, String) {
        colored::control::set_override(false);
        let dashboard = Dashboard::builder()
            .with_registry(default_catalog().unwrap())
            .build();
        let mut console = Console::new(dashboard, script.as_bytes(), Vec::new());
        console.run().await.unwrap();
        let (dashboard, out) = console.into_parts();
        (dashboard, String::from_utf8(out).unwrap())
    }

    const LOGIN: &str = "login admin@example.com admin123\n";

    #[tokio::test]
    async fn test_commands_need_login() {
        let (dashboard, out) = run_script("list\ntoggle 1\n").await;
        assert!(out.contains("Unauthorized"));
        assert!(!dashboard.is_authenticated());
    }

    #[tokio::test]
    async fn test_toggle_and_list() {
        let script = format!("{LOGIN}toggle 1\nlist\nquit\n");
        let (dashboard, out) = run_script(&script).await;

        let plans = dashboard.plans().unwrap();
        assert!(!plans.get(PlanId(1)).unwrap().is_active);
        assert!(out.contains("Plan 1 is now inactive"));
        assert!(out.contains("Professional"));
    }

    #[tokio::test]
    async fn test_delete_asks_first() {
        let script = format!("{LOGIN}delete 2\nn\ndelete 3\ny\n");
        let (dashboard, out) = run_script(&script).await;

        let plans = dashboard.plans().unwrap();
        assert!(plans.contains(PlanId(2)));
        assert!(!plans.contains(PlanId(3)));
        assert!(out.contains("Delete plan 'Professional'?"));
        assert!(out.contains("Kept the plan"));
        assert!(out.contains("Deleted plan 3"));
    }

    #[tokio::test]
    async fn test_invalid_commit_keeps_edit_open() {
        let script = format!("{LOGIN}edit 1\nset name\ncommit\nset monthly 12.50\n");
        let (dashboard, out) = run_script(&script).await;

        assert!(out.contains("invalid name"));
        let plans = dashboard.plans().unwrap();
        let session = plans.editing().unwrap();
        assert_eq!(session.plan_id(), PlanId(1));
        assert_eq!(session.draft().monthly_price_cents, 1250);
        assert_eq!(plans.get(PlanId(1)).unwrap().name, "Starter");
    }

    #[tokio::test]
    async fn test_edit_features_and_commit() {
        let script = format!(
            "{LOGIN}edit 3\nfeature add  Audit log \nfeature rm 0\nfeature rm 99\nset maxapps 25\ncommit\n"
        );
        let (dashboard, out) = run_script(&script).await;

        assert!(out.contains("feature index 99 out of bounds"));
        let plans = dashboard.plans().unwrap();
        assert!(plans.editing().is_none());
        let plan = plans.get(PlanId(3)).unwrap();
        assert_eq!(plan.features.last().map(String::as_str), Some("Audit log"));
        assert_eq!(plan.max_apps, AppLimit::Limited(25));
        assert_eq!(plan.subscriber_count, 142);
    }

    #[tokio::test]
    async fn test_create_with_spaced_name() {
        let script = format!("{LOGIN}create Team Plan 49.99 $499\ncreate Bad -5 10\n");
        let (dashboard, out) = run_script(&script).await;

        let plans = dashboard.plans().unwrap();
        assert_eq!(plans.len(), 4);
        let plan = plans.get(PlanId(4)).unwrap();
        assert_eq!(plan.name, "Team Plan");
        assert_eq!(plan.monthly_price_cents, 4999);
        assert_eq!(plan.yearly_price_cents, 49900);
        assert!(out.contains("invalid monthly_price"));
    }

    #[tokio::test]
    async fn test_navigation_and_logout() {
        let script = format!("{LOGIN}go plans\ngo billing\nedit 1\nlogout\n");
        let (dashboard, out) = run_script(&script).await;

        assert!(out.contains("Now viewing Subscription Plans"));
        assert!(out.contains("Unknown section: billing"));
        assert_eq!(dashboard.section(), Section::Overview);
        assert!(!dashboard.is_authenticated());
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(split_word("feature add A B"), ("feature", "add A B"));
        assert_eq!(split_word("list"), ("list", ""));
        assert_eq!(parse_app_limit("Unlimited").unwrap(), AppLimit::Unlimited);
        assert_eq!(parse_app_limit("-1").unwrap(), AppLimit::Unlimited);
        assert!(parse_app_limit("-2").is_err());
        assert!(is_yes(" Y\n"));
        assert!(!is_yes("nope"));
    }
}
