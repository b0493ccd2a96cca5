//! Interactive table session.

use std::io::Write;
use std::time::Instant;

use fadila_lib::Language;
use fadila_lib::OrganizationClient;
use fadila_lib::Text;
use fadila_lib::columns;
use fadila_lib::mock;
use fadila_lib::model::MeetingCalendar;
use fadila_lib::model::MeetingSlot;
use fadila_lib::model::Student;
use fadila_lib::model::Teacher;
use fadila_lib::model::Visitor;
use fadila_lib::quick_assign::QuickAssign;
use fadila_ui::Record;
use fadila_ui::State;
use fadila_ui::Value;
use fadila_ui::toast::Toast;
use fadila_ui::widgets::Alignment;
use fadila_ui::widgets::Column;
use fadila_ui::widgets::DataTable;
use fadila_ui::widgets::DataTableConfig;
use fadila_ui::widgets::EventResult;
use fadila_ui::widgets::RetryAction;
use fadila_ui::widgets::RowKey;
use fadila_ui::widgets::SimpleColumn;
use fadila_ui::widgets::SimpleTable;
use fadila_ui::widgets::TableRow;

use crate::cli::Page;
use crate::command::Command;
use crate::command::HELP;
use crate::config::CliConfig;
use crate::context::AppContext;
use crate::error::CliError;
use crate::layout::LayoutStore;
use crate::render::Renderer;

/// Whether the loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    ctx: AppContext,
    renderer: Renderer,
    page: Page,
    teachers: DataTable<Teacher>,
    students: DataTable<Student>,
    organization: DataTable<Record>,
    calendar: MeetingCalendar,
    visitors: Vec<Visitor>,
    client: Option<OrganizationClient>,
    /// Details of the last clicked row, written by the row-click handler.
    opened: State<Option<String>>,
}

/// Build a page table wired to layout persistence and toasts.
fn page_table<T: TableRow + Send + 'static>(
    page: Page,
    data: Vec<T>,
    defaults: Vec<Column>,
    extras: Vec<Column>,
    ctx: &AppContext,
    layouts: Option<&LayoutStore>,
    opened: &State<Option<String>>,
) -> Result<DataTable<T>, CliError> {
    let lang = ctx.language();
    let mut config = DataTableConfig::new(data).selectable(true);

    if let Some(store) = layouts {
        match store.load(page) {
            Ok(Some(layout)) => {
                log::info!("restoring saved {} layout", page.slug());
                config = config.columns(layout.apply(&defaults, &extras));
            }
            Ok(None) => {}
            Err(e) => log::warn!("ignoring saved layout: {e}"),
        }

        let store = store.clone();
        let toasts = ctx.clone();
        config = config.on_columns_change(move |columns| match store.save(page, columns) {
            Ok(()) => {
                toasts.toast(Toast::success(lang.text(Text::ColumnsSaved)));
            }
            Err(e) => {
                log::warn!("layout not saved: {e}");
                toasts.toast(Toast::warning(e.to_string()));
            }
        });
    }

    let toasts = ctx.clone();
    let opened = opened.clone();
    let table = config
        .default_columns(defaults)
        .extra_columns(extras)
        .on_selected_rows_change(move |keys| {
            toasts.toast(Toast::info(lang.selected_count(keys.len())));
        })
        .on_row_click(move |row, index| {
            let details = row
                .values()
                .iter()
                .map(Value::to_string)
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
                .join(" · ");
            log::debug!("row {index} opened");
            opened.set(Some(details));
        })
        .build()?;
    Ok(table)
}

fn organization_table() -> Result<DataTable<Record>, CliError> {
    Ok(DataTableConfig::new(Vec::new())
        .columns(Vec::new())
        .build()?)
}

/// Columns for fetched records: `id` first, then every other field sorted.
fn record_columns(records: &[Record]) -> Vec<Column> {
    let mut keys: Vec<&str> = records
        .iter()
        .flat_map(|r| r.fields().keys().map(String::as_str))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys.sort_by_key(|k| *k != "id");
    keys.into_iter().map(|k| Column::new(k, k)).collect()
}

impl Session {
    pub fn new(
        config: &CliConfig,
        ctx: AppContext,
        layouts: Option<LayoutStore>,
    ) -> Result<Self, CliError> {
        let lang = ctx.language();
        let opened = State::new(None);
        let layouts = layouts.filter(|_| config.persist_layouts);

        let teachers = page_table(
            Page::Teachers,
            mock::teachers(),
            columns::teacher_columns(lang),
            columns::teacher_extra_columns(lang),
            &ctx,
            layouts.as_ref(),
            &opened,
        )?;
        let students = page_table(
            Page::Students,
            mock::students(),
            columns::student_columns(lang),
            columns::student_extra_columns(lang),
            &ctx,
            layouts.as_ref(),
            &opened,
        )?;

        let client = match &config.api_base {
            Some(base) => Some(
                OrganizationClient::builder()
                    .base_url(base)?
                    .timeout(config.fetch_timeout())
                    .build()?,
            ),
            None => None,
        };

        Ok(Self {
            renderer: Renderer::new(lang, config.color),
            ctx,
            page: config.page,
            teachers,
            students,
            organization: organization_table()?,
            calendar: mock::meeting_calendar(),
            visitors: mock::visitors(),
            client,
            opened,
        })
    }

    pub fn page(&self) -> Page {
        self.page
    }

    fn lang(&self) -> Language {
        self.ctx.language()
    }

    /// Current page rendered.
    pub fn render(&self) -> String {
        let title = self.page.title(self.lang());
        match self.page {
            Page::Teachers => self.renderer.table(title, &self.teachers.view()),
            Page::Students => self.renderer.table(title, &self.students.view()),
        }
    }

    /// Print toasts posted since the last call.
    pub fn flush_toasts(&self, out: &mut impl Write) -> Result<(), CliError> {
        for (level, message) in self.ctx.fresh_toasts(Instant::now()) {
            writeln!(out, "{}", self.renderer.toast(level, &message))?;
        }
        Ok(())
    }

    pub async fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow, CliError> {
        log::debug!("command {command:?}");
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Show => writeln!(out, "{}", self.render())?,
            Command::Page(page) => {
                self.page = page;
                writeln!(out, "{}", self.render())?;
            }
            Command::Hours { teacher, value } => {
                self.quick_assign(teacher, &value)?;
                writeln!(out, "{}", self.render())?;
            }
            Command::Meetings => self.print_meetings(out)?,
            Command::ToggleSlot(id) => {
                let open = self.calendar.toggle(id)?;
                log::info!("slot #{id} open={open}");
                self.print_meetings(out)?;
            }
            Command::Book { slot, student } => {
                match self.calendar.book(slot, student) {
                    Ok(()) => {
                        self.ctx.toast(Toast::success(self.lang().text(Text::SlotBooked)));
                    }
                    Err(e) => {
                        self.ctx.toast(Toast::error(format!(
                            "{}: {e}",
                            self.lang().text(Text::SlotUnavailable)
                        )));
                    }
                }
                self.print_meetings(out)?;
            }
            Command::Cancel(slot) => {
                if let Some(student) = self.calendar.cancel(slot)? {
                    log::info!("booking of student #{student} on slot #{slot} cancelled");
                }
                self.print_meetings(out)?;
            }
            Command::Visitors => self.print_visitors(out)?,
            Command::Organization => self.fetch_organization(out).await?,
            Command::Retry => match self.organization.retry() {
                RetryAction::Handled => {}
                RetryAction::Reload => self.fetch_organization(out).await?,
            },
            other => {
                let redraw = match self.page {
                    Page::Teachers => {
                        table_command(&mut self.teachers, other, &self.renderer, &self.opened, out)?
                    }
                    Page::Students => {
                        table_command(&mut self.students, other, &self.renderer, &self.opened, out)?
                    }
                };
                if redraw {
                    writeln!(out, "{}", self.render())?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn quick_assign(&mut self, teacher: u32, value: &str) -> Result<(), CliError> {
        if self.page != Page::Teachers {
            return Err(CliError::WrongPage("hours"));
        }
        let current = self
            .teachers
            .data()
            .iter()
            .find(|t| t.id == teacher)
            .ok_or_else(|| CliError::UnknownRow(teacher.to_string()))?;

        let mut editor = QuickAssign::open(current);
        editor.set_draft(value);
        let mut data = self.teachers.data().to_vec();
        let lang = self.lang();
        match editor.submit(&mut data) {
            Ok(_) => {
                self.teachers.set_data(data)?;
                self.ctx.toast(Toast::success(lang.text(Text::HoursSaved)));
            }
            Err(e) => {
                log::warn!("{e}");
                self.ctx.toast(Toast::error(lang.text(Text::HoursInvalid)));
            }
        }
        Ok(())
    }

    fn print_meetings(&self, out: &mut impl Write) -> Result<(), CliError> {
        let lang = self.lang();
        let columns = vec![
            SimpleColumn::new(lang.text(Text::ColId), "id").align(Alignment::Right),
            SimpleColumn::new(lang.text(Text::ColDate), "date"),
            SimpleColumn::new(lang.text(Text::ColTime), "time"),
            SimpleColumn::new(lang.text(Text::ColOpen), "open")
                .align(Alignment::Center)
                .render(|_, slot: &MeetingSlot| if slot.open { "✓" } else { "✗" }.to_string()),
            SimpleColumn::new(lang.text(Text::ColBookedBy), "booked_by").align(Alignment::Right),
            SimpleColumn::new(lang.text(Text::ColCommission), "commission"),
        ];
        let table = SimpleTable::new(columns, self.calendar.slots().to_vec())
            .empty_message(lang.text(Text::NoData));
        writeln!(out, "{}", self.renderer.simple(lang.text(Text::Meetings), &table.view()))?;
        Ok(())
    }

    fn print_visitors(&self, out: &mut impl Write) -> Result<(), CliError> {
        let lang = self.lang();
        let columns = vec![
            SimpleColumn::new(lang.text(Text::ColName), "name"),
            SimpleColumn::new(lang.text(Text::ColPurpose), "purpose"),
            SimpleColumn::new(lang.text(Text::ColArrivedAt), "arrived_at"),
            SimpleColumn::new(lang.text(Text::ColHost), "host"),
        ];
        let table = SimpleTable::new(columns, self.visitors.clone())
            .empty_message(lang.text(Text::NoData));
        writeln!(out, "{}", self.renderer.simple(lang.text(Text::Visitors), &table.view()))?;
        Ok(())
    }

    async fn fetch_organization(&mut self, out: &mut impl Write) -> Result<(), CliError> {
        let lang = self.lang();
        let title = lang.text(Text::Organization);
        let Some(client) = self.client.clone() else {
            self.ctx.toast(Toast::warning(lang.text(Text::NoApi)));
            return Ok(());
        };

        self.organization.set_loading(true);
        writeln!(out, "{}", self.renderer.table(title, &self.organization.view()))?;
        out.flush()?;

        match client.fetch_organization().await {
            Ok(records) => {
                self.organization.set_columns(record_columns(&records))?;
                self.organization.set_data(records)?;
                self.organization.set_loading(false);
            }
            Err(e) => {
                log::warn!("organization fetch failed: {e}");
                self.organization.set_error(Some(e.to_string()));
                self.ctx.toast(Toast::error(lang.text(Text::LoadFailed)));
            }
        }
        writeln!(out, "{}", self.renderer.table(title, &self.organization.view()))?;
        Ok(())
    }
}

/// Commands shared by every page table. Returns whether to redraw.
fn table_command<T: TableRow>(
    table: &mut DataTable<T>,
    command: Command,
    renderer: &Renderer,
    opened: &State<Option<String>>,
    out: &mut impl Write,
) -> Result<bool, CliError> {
    match command {
        Command::Search(query) => {
            table.set_search(query);
        }
        Command::Sort(key) => {
            if !table.click_header(&key).is_consumed() {
                writeln!(out, "`{key}` is not a sortable visible column")?;
                return Ok(false);
            }
        }
        Command::Unsort(key) => {
            table.double_click_header(&key);
        }
        Command::Toggle(key) => {
            table.toggle_column(&key)?;
        }
        Command::Move { key, position } => {
            table.begin_column_drag(&key)?;
            let target = position.saturating_sub(1);
            if let Err(e) = table.drag_over(target) {
                table.cancel_column_drag()?;
                return Err(e.into());
            }
            table.end_column_drag()?;
        }
        Command::Resize { key, delta } => {
            // The handle sits on the left edge: moving the pointer left widens.
            table.begin_resize(&key, 0)?;
            table.resize_move(delta.saturating_neg())?;
            let width = table.end_resize()?;
            log::info!("column {key} resized to {width}px");
        }
        Command::Add(key) => table.add_extra_column(&key)?,
        Command::Remove(key) => table.remove_column(&key)?,
        Command::Reset => table.reset_columns()?,
        Command::Columns => {
            writeln!(out, "{}", renderer.columns(table.columns(), |k| table.is_removable(k)))?;
            return Ok(false);
        }
        Command::Pool => {
            writeln!(out, "{}", renderer.pool(&table.available_extra_columns()))?;
            return Ok(false);
        }
        Command::Select(id) => {
            let key = RowKey::new(id);
            if !table.data().iter().any(|r| r.key().as_ref() == Some(&key)) {
                return Err(CliError::UnknownRow(key.to_string()));
            }
            table.toggle_row(&key)?;
        }
        Command::SelectAll => {
            table.toggle_select_all()?;
        }
        Command::Open(n) => {
            match table.click_row(n.saturating_sub(1)) {
                EventResult::Consumed => {
                    if let Some(details) = opened.update(Option::take) {
                        writeln!(out, "{details}")?;
                    }
                }
                EventResult::Ignored => writeln!(out, "no row {n}")?,
            }
            return Ok(false);
        }
        other => {
            log::warn!("unhandled command {other:?}");
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use fadila_ui::toast::ToastLevel;
    use fadila_ui::widgets::MIN_COLUMN_WIDTH;
    use fadila_ui::widgets::TableView;

    use super::*;

    fn config(lang: Language) -> CliConfig {
        CliConfig {
            language: lang,
            color: false,
            ..CliConfig::default()
        }
    }

    fn session(dir: &std::path::Path) -> Session {
        let config = config(Language::En);
        Session::new(&config, AppContext::new(Language::En), Some(LayoutStore::new(dir))).unwrap()
    }

    async fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        let command = line.parse::<Command>().unwrap();
        session.execute(command, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_record_columns_put_id_first() {
        let records = vec![
            Record::new().set("level", "CP").set("id", "cp-a"),
            Record::new().set("students", 22).set("id", "cp-b"),
        ];
        let keys: Vec<String> = record_columns(&records).into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["id", "level", "students"]);
    }

    #[tokio::test]
    async fn test_sort_and_search() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        let out = run(&mut s, "sort name").await;
        assert!(out.contains("Full name ▲"));
        run(&mut s, "search haddad").await;
        assert_eq!(s.teachers.shown_count(), 1);
        assert!(s.render().ends_with("1 of 10 shown"));
    }

    #[tokio::test]
    async fn test_layout_is_saved_and_restored() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        run(&mut s, "add email").await;
        run(&mut s, "move email 1").await;
        run(&mut s, "resize name 40").await;

        let restored = session(dir.path());
        let columns = restored.teachers.columns();
        assert_eq!(columns[0].key, "email");
        let name = columns.iter().find(|c| c.key == "name").unwrap();
        assert_eq!(name.width, 240);
        assert!(restored.teachers.is_removable("email"));
        assert_eq!(
            s.ctx.fresh_toasts(Instant::now()).first().map(|(l, _)| *l),
            Some(ToastLevel::Success)
        );
    }

    #[tokio::test]
    async fn test_resize_by_extreme_deltas() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        run(&mut s, "resize name -2147483648").await;
        let width = |s: &Session| s.teachers.columns().iter().find(|c| c.key == "name").unwrap().width;
        assert_eq!(width(&s), MIN_COLUMN_WIDTH);

        run(&mut s, "resize name 2147483647").await;
        assert_eq!(width(&s), MIN_COLUMN_WIDTH + 2_147_483_647);
    }

    #[tokio::test]
    async fn test_quick_assign_validates() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        s.ctx.fresh_toasts(Instant::now());

        run(&mut s, "hours 2 45").await;
        assert_eq!(s.teachers.data()[1].weekly_hours, 22);
        let toasts = s.ctx.fresh_toasts(Instant::now());
        assert_eq!(toasts[0].0, ToastLevel::Error);

        run(&mut s, "hours 2 30").await;
        assert_eq!(s.teachers.data()[1].weekly_hours, 30);

        run(&mut s, "page students").await;
        let err = s
            .execute(Command::Hours { teacher: 2, value: "10".into() }, &mut Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::WrongPage("hours")));
    }

    #[tokio::test]
    async fn test_double_booking_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        s.ctx.fresh_toasts(Instant::now());

        run(&mut s, "book 1 107").await;
        let out = run(&mut s, "book 1 112").await;
        assert!(out.contains("Registration meetings"));
        let levels: Vec<ToastLevel> = s
            .ctx
            .fresh_toasts(Instant::now())
            .into_iter()
            .map(|(l, _)| l)
            .collect();
        assert_eq!(levels, vec![ToastLevel::Success, ToastLevel::Error]);
        assert_eq!(s.calendar.get(1).and_then(|slot| slot.booked_by), Some(107));
    }

    #[tokio::test]
    async fn test_selection_and_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        run(&mut s, "select 3").await;
        assert_eq!(s.teachers.selected_rows(), vec![RowKey::from("3")]);
        assert!(matches!(
            s.execute(Command::Select("99".into()), &mut Vec::new()).await,
            Err(CliError::UnknownRow(_))
        ));

        let out = run(&mut s, "open 1").await;
        assert!(out.contains("Amina Benali"));
        assert_eq!(run(&mut s, "open 50").await.trim(), "no row 50");
    }

    #[tokio::test]
    async fn test_organization_without_api() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        s.ctx.fresh_toasts(Instant::now());
        run(&mut s, "org").await;
        let toasts = s.ctx.fresh_toasts(Instant::now());
        assert_eq!(toasts[0], (ToastLevel::Warning, "No API configured (--api)".to_string()));
    }

    #[tokio::test]
    async fn test_organization_failure_shows_error_state() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let config = CliConfig {
            api_base: Some(base),
            ..config(Language::En)
        };
        let mut s = Session::new(&config, AppContext::new(Language::En), None).unwrap();
        let out = run(&mut s, "org").await;
        assert!(out.contains("Loading"));
        assert!(matches!(s.organization.view(), TableView::Error { .. }));

        let out = run(&mut s, "retry").await;
        assert!(out.contains("Failed to load"));
    }
}
