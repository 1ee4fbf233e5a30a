// SPDX-License-Identifier: MPL-2.0
//! Tools page: network diagnostics and a small file manager.
//!
//! Every button starts a short dialog chain (name prompt, pickers,
//! confirmation) that ends in an [`Operation`] run on a worker. Results and
//! errors are appended to the read-only log pane.

mod operation;

pub use operation::{Confirmation, Operation, Outcome};

use super::UpdateContext;
use crate::config::{
    DEFAULT_IP_CONFIG_TIMEOUT_SECS, DEFAULT_PING_HOST, DEFAULT_PING_TIMEOUT_SECS,
    IP_CONFIG_PROGRESS_INTERVAL, IP_CONFIG_PROGRESS_STEP, LOADING_HIDE_DELAY, PING_COUNT,
    PING_PROGRESS_INTERVAL, PING_PROGRESS_STEP,
};
use crate::error::{Error, Result};
use crate::i18n::I18n;
use crate::tools::fs_ops::display_name;
use crate::tools::{network, CommandOutput, ToolLog};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::dialogs::{self, Filter, Tone};
use crate::ui::loading::ProgressTicker;
use crate::ui::notifications::Notification;
use crate::ui::prompt::{self, Prompt, Purpose};
use crate::ui::styles;
use crate::worker;
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Alignment, Element, Font, Length, Task};
use std::path::PathBuf;
use std::time::Duration;

/// Extensions offered first by "Read File".
const TEXT_EXTENSIONS: &[&str] = &["txt", "log", "md", "py", "js"];

/// Which picked file continues which chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStep {
    Read,
    Delete,
    Rename,
    Copy,
    Move,
}

impl FileStep {
    /// Steps that also act on folders when no file is chosen.
    fn accepts_folder(self) -> bool {
        matches!(self, FileStep::Rename | FileStep::Copy | FileStep::Move)
    }
}

/// Which picked folder continues which chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderStep {
    /// A folder picked in place of a file for `FileStep`.
    Source(FileStep),
    CreateFileIn(String),
    CreateFolderIn(String),
    DeleteFolder,
    CopyTo(PathBuf),
    MoveTo(PathBuf),
    List,
}

#[derive(Debug, Clone)]
pub enum Message {
    Ping,
    PingAnswered(bool),
    PingDone(Result<CommandOutput>),
    IpConfig,
    IpConfigAnswered(bool),
    IpConfigDone(Result<CommandOutput>),

    CreateFile,
    ReadFile,
    DeleteFile,
    DeleteFolder,
    CreateFolder,
    Rename,
    Copy,
    Move,
    List,

    Prompt(prompt::Message),
    FilePicked(FileStep, Option<PathBuf>),
    FolderPicked(FolderStep, Option<PathBuf>),
    Confirmed(Operation, bool),
    Finished(Operation, Result<Outcome>),
    HideLoading,

    OpenDownloads,
    DownloadsOpened(Result<PathBuf>),
    Clear,
}

#[derive(Debug, Clone)]
pub struct State {
    log: ToolLog,
    prompt: Option<Prompt>,
}

impl State {
    pub fn new(i18n: &I18n) -> Self {
        Self {
            log: ToolLog::new(i18n.tr("tools-ready")),
            prompt: None,
        }
    }

    #[must_use]
    pub fn log(&self) -> &ToolLog {
        &self.log
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn update(&mut self, message: Message, ctx: &mut UpdateContext<'_>) -> Task<Message> {
        let i18n = ctx.i18n;
        match message {
            Message::Ping => {
                let host = ping_host(ctx);
                Task::perform(
                    dialogs::confirm(
                        Tone::Question,
                        i18n.tr("tools-ping-access-title"),
                        i18n.tr_with_args("tools-ping-access-body", &[("host", host.as_str())]),
                    ),
                    Message::PingAnswered,
                )
            }
            Message::PingAnswered(false) => {
                self.log.push_entry(i18n.tr("tools-ping-denied"));
                Task::none()
            }
            Message::PingAnswered(true) => {
                let host = ping_host(ctx);
                let timeout = Duration::from_secs(
                    ctx.config
                        .tools
                        .ping_timeout_secs
                        .unwrap_or(DEFAULT_PING_TIMEOUT_SECS),
                );
                self.log
                    .push_entry(i18n.tr_with_args("tools-ping-started", &[("host", host.as_str())]));
                ctx.loading.show_ticking(
                    i18n.tr("tools-ping-loading"),
                    ProgressTicker {
                        step: PING_PROGRESS_STEP,
                        interval: PING_PROGRESS_INTERVAL,
                    },
                );
                Task::perform(
                    async move { network::ping(&host, PING_COUNT, timeout).await },
                    Message::PingDone,
                )
            }
            Message::PingDone(result) => {
                self.log.push_entry(ping_entry(&result, i18n));
                finish_loading(ctx)
            }
            Message::IpConfig => Task::perform(
                dialogs::confirm(
                    Tone::Question,
                    i18n.tr("tools-ip-access-title"),
                    i18n.tr("tools-ip-access-body"),
                ),
                Message::IpConfigAnswered,
            ),
            Message::IpConfigAnswered(false) => {
                self.log.push_entry(i18n.tr("tools-ip-denied"));
                Task::none()
            }
            Message::IpConfigAnswered(true) => {
                let timeout = Duration::from_secs(
                    ctx.config
                        .tools
                        .ip_config_timeout_secs
                        .unwrap_or(DEFAULT_IP_CONFIG_TIMEOUT_SECS),
                );
                self.log.push_entry(i18n.tr("tools-ip-started"));
                ctx.loading.show_ticking(
                    i18n.tr("tools-ip-loading"),
                    ProgressTicker {
                        step: IP_CONFIG_PROGRESS_STEP,
                        interval: IP_CONFIG_PROGRESS_INTERVAL,
                    },
                );
                Task::perform(
                    async move { network::ip_config(timeout).await },
                    Message::IpConfigDone,
                )
            }
            Message::IpConfigDone(result) => {
                self.log.push_entry(ip_config_entry(&result, i18n));
                finish_loading(ctx)
            }

            Message::CreateFile => {
                self.prompt = Some(Prompt::new(
                    Purpose::NewFile,
                    i18n.tr("tools-create-file-title"),
                    i18n.tr("tools-create-file-label"),
                ));
                Task::none()
            }
            Message::CreateFolder => {
                self.prompt = Some(Prompt::new(
                    Purpose::NewFolder,
                    i18n.tr("tools-create-folder-title"),
                    i18n.tr("tools-create-folder-label"),
                ));
                Task::none()
            }
            Message::ReadFile => pick_file(
                FileStep::Read,
                i18n.tr("tools-read-file-pick-title"),
                vec![
                    Filter::new(i18n.tr("tools-filter-text"), TEXT_EXTENSIONS),
                    Filter::new(i18n.tr("tools-filter-all"), &["*"]),
                ],
            ),
            Message::DeleteFile => pick_any_file(FileStep::Delete, "tools-delete-file-pick-title", i18n),
            Message::Rename => pick_any_file(FileStep::Rename, "tools-rename-pick-title", i18n),
            Message::Copy => pick_any_file(FileStep::Copy, "tools-copy-pick-title", i18n),
            Message::Move => pick_any_file(FileStep::Move, "tools-move-pick-title", i18n),
            Message::DeleteFolder => pick_folder(
                FolderStep::DeleteFolder,
                i18n.tr("tools-delete-folder-pick-title"),
            ),
            Message::List => pick_folder(FolderStep::List, i18n.tr("tools-list-pick-title")),

            Message::Prompt(message) => {
                let Some(prompt) = &mut self.prompt else {
                    return Task::none();
                };
                match prompt.update(message) {
                    prompt::Event::None => Task::none(),
                    prompt::Event::Cancelled => {
                        self.prompt = None;
                        Task::none()
                    }
                    prompt::Event::Submitted(purpose, value) => {
                        self.prompt = None;
                        match purpose {
                            Purpose::NewFile => pick_folder(
                                FolderStep::CreateFileIn(value),
                                i18n.tr("tools-create-file-location"),
                            ),
                            Purpose::NewFolder => pick_folder(
                                FolderStep::CreateFolderIn(value),
                                i18n.tr("tools-create-folder-location"),
                            ),
                            Purpose::Rename(path) => self.confirm(
                                Operation::Rename {
                                    path,
                                    new_name: value,
                                },
                                ctx,
                            ),
                        }
                    }
                }
            }

            Message::FilePicked(step, None) if step.accepts_folder() => pick_folder(
                FolderStep::Source(step),
                i18n.tr("tools-source-folder-title"),
            ),
            Message::FilePicked(_, None) | Message::FolderPicked(_, None) => Task::none(),
            Message::FilePicked(step, Some(path))
            | Message::FolderPicked(FolderStep::Source(step), Some(path)) => {
                self.source_picked(step, path, ctx)
            }
            Message::FolderPicked(step, Some(dir)) => match folder_operation(step, dir) {
                Some(operation) => self.confirm(operation, ctx),
                None => Task::none(),
            },
            Message::Confirmed(operation, false) => {
                tracing::debug!(?operation, "file operation declined");
                Task::none()
            }
            Message::Confirmed(operation, true) => self.start(operation, ctx),
            Message::Finished(operation, result) => {
                let task = if matches!(operation, Operation::CreateFile { .. }) {
                    finish_loading(ctx)
                } else {
                    ctx.loading.hide();
                    Task::none()
                };
                match result {
                    Ok(outcome) => {
                        for entry in outcome.log_entries(i18n) {
                            self.log.push_entry(entry);
                        }
                        if let Some(notification) = outcome.notification() {
                            ctx.notify(notification);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(?operation, error = %e, "file operation failed");
                        self.log.push_entry(operation.error_entry(&e, i18n));
                    }
                }
                task
            }
            Message::HideLoading => {
                ctx.loading.hide();
                Task::none()
            }

            Message::OpenDownloads => {
                let Some(dir) = dirs::download_dir() else {
                    ctx.notify(Notification::warning("tools-downloads-missing"));
                    return Task::none();
                };
                worker::spawn(
                    move || {
                        open::that_detached(&dir)
                            .map(|()| dir.clone())
                            .map_err(|e| Error::io_at(&dir, &e))
                    },
                    Message::DownloadsOpened,
                )
            }
            Message::DownloadsOpened(Ok(dir)) => {
                tracing::info!(path = %dir.display(), "opened downloads folder");
                Task::none()
            }
            Message::DownloadsOpened(Err(e)) => {
                ctx.notify(Notification::error("tools-open-failed").with_arg("error", e.detail()));
                Task::none()
            }
            Message::Clear => {
                self.log.clear();
                Task::none()
            }
        }
    }

    /// Continues a chain once the file or folder it acts on is known.
    fn source_picked(
        &mut self,
        step: FileStep,
        path: PathBuf,
        ctx: &mut UpdateContext<'_>,
    ) -> Task<Message> {
        let i18n = ctx.i18n;
        match step {
            FileStep::Read => self.confirm(Operation::ReadFile(path), ctx),
            FileStep::Delete => self.confirm(Operation::DeleteFile(path), ctx),
            FileStep::Rename => {
                let name = display_name(&path);
                self.prompt = Some(Prompt::new(
                    Purpose::Rename(path),
                    i18n.tr("tools-rename-title"),
                    i18n.tr_with_args("tools-rename-label", &[("name", name.as_str())]),
                ));
                Task::none()
            }
            FileStep::Copy => pick_folder(
                FolderStep::CopyTo(path),
                i18n.tr("tools-destination-title"),
            ),
            FileStep::Move => pick_folder(
                FolderStep::MoveTo(path),
                i18n.tr("tools-destination-title"),
            ),
        }
    }

    /// Asks before `operation` runs, or runs it when nothing needs asking.
    fn confirm(&mut self, operation: Operation, ctx: &mut UpdateContext<'_>) -> Task<Message> {
        match operation.confirmation(ctx.i18n) {
            Some(Confirmation {
                tone,
                title,
                description,
            }) => Task::perform(dialogs::confirm(tone, title, description), move |yes| {
                Message::Confirmed(operation, yes)
            }),
            None => self.start(operation, ctx),
        }
    }

    fn start(&mut self, operation: Operation, ctx: &mut UpdateContext<'_>) -> Task<Message> {
        ctx.loading.show(operation.loading_message(ctx.i18n));
        if matches!(operation, Operation::CreateFile { .. }) {
            ctx.loading.set_progress(50.0);
        }
        let job = operation.clone();
        worker::spawn(move || job.run(), move |result| {
            Message::Finished(operation, result)
        })
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let log = container(
            scrollable(
                text(self.log.text())
                    .size(typography::MONO)
                    .font(Font::MONOSPACE)
                    .width(Length::Fill),
            )
            .anchor_bottom()
            .height(Length::Fill),
        )
        .padding(spacing::SM)
        .height(Length::Fixed(sizing::LOG_HEIGHT))
        .width(Length::Fill)
        .style(styles::container::log_pane);

        let network = section(
            i18n.tr("tools-section-network"),
            vec![
                tool_button(i18n.tr("tools-ping"), Message::Ping),
                tool_button(i18n.tr("tools-ip-config"), Message::IpConfig),
            ],
        );
        let files = section(
            i18n.tr("tools-section-files"),
            vec![
                tool_button(i18n.tr("tools-create-file"), Message::CreateFile),
                tool_button(i18n.tr("tools-read-file"), Message::ReadFile),
                tool_button(i18n.tr("tools-delete-file"), Message::DeleteFile),
                tool_button(i18n.tr("tools-rename"), Message::Rename),
                tool_button(i18n.tr("tools-copy"), Message::Copy),
                tool_button(i18n.tr("tools-move"), Message::Move),
            ],
        );
        let folders = section(
            i18n.tr("tools-section-folders"),
            vec![
                tool_button(i18n.tr("tools-create-folder"), Message::CreateFolder),
                tool_button(i18n.tr("tools-delete-folder"), Message::DeleteFolder),
                tool_button(i18n.tr("tools-list"), Message::List),
            ],
        );
        let system = section(
            i18n.tr("tools-section-system"),
            vec![tool_button(i18n.tr("tools-open-downloads"), Message::OpenDownloads)],
        );

        let clear = row![
            Space::new().width(Length::Fill),
            button(text(i18n.tr("tools-clear")))
                .style(styles::button::danger)
                .on_press_maybe((!self.log.is_pristine()).then_some(Message::Clear)),
        ];

        let content: Element<'a, Message> = column![
            text(i18n.tr("tools-title")).size(typography::TITLE_MD),
            log,
            network,
            files,
            folders,
            system,
            clear,
        ]
        .spacing(spacing::SM)
        .width(Length::Fill)
        .into();

        match &self.prompt {
            Some(prompt) => prompt.view(content, i18n, Message::Prompt),
            None => content,
        }
    }
}

fn ping_host(ctx: &UpdateContext<'_>) -> String {
    ctx.config
        .tools
        .ping_host
        .clone()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PING_HOST.to_string())
}

/// Completes the progress bar and closes the overlay shortly after.
fn finish_loading(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    ctx.loading.set_progress(100.0);
    worker::after(LOADING_HIDE_DELAY, Message::HideLoading)
}

/// Log entry for a finished ping.
pub fn ping_entry(result: &Result<CommandOutput>, i18n: &I18n) -> String {
    match result {
        Ok(output) => {
            let verdict = if output.success {
                i18n.tr("tools-ping-complete")
            } else {
                i18n.tr("tools-ping-failed")
            };
            format!("{}\n{verdict}", output.text().trim_end())
        }
        Err(Error::Timeout { .. }) => i18n.tr("tools-ping-timeout"),
        Err(e) => i18n.tr_with_args("tools-error", &[("error", e.detail().as_str())]),
    }
}

/// Log entry for a finished network configuration dump.
pub fn ip_config_entry(result: &Result<CommandOutput>, i18n: &I18n) -> String {
    match result {
        Ok(output) => output.text().trim_end().to_string(),
        Err(Error::Timeout { .. }) => i18n.tr("tools-ip-timeout"),
        Err(e) => i18n.tr_with_args("tools-error", &[("error", e.detail().as_str())]),
    }
}

/// The operation a folder chain ends in once its folder is known.
fn folder_operation(step: FolderStep, dir: PathBuf) -> Option<Operation> {
    let operation = match step {
        FolderStep::Source(_) => return None,
        FolderStep::CreateFileIn(name) => Operation::CreateFile { dir, name },
        FolderStep::CreateFolderIn(name) => Operation::CreateFolder { dir, name },
        FolderStep::DeleteFolder => Operation::DeleteFolder(dir),
        FolderStep::CopyTo(source) => Operation::Copy {
            source,
            dest_dir: dir,
        },
        FolderStep::MoveTo(source) => Operation::Move {
            source,
            dest_dir: dir,
        },
        FolderStep::List => Operation::List(dir),
    };
    Some(operation)
}

fn pick_file(step: FileStep, title: String, filters: Vec<Filter>) -> Task<Message> {
    Task::perform(dialogs::pick_file(title, filters), move |path| {
        Message::FilePicked(step, path)
    })
}

fn pick_any_file(step: FileStep, title_key: &str, i18n: &I18n) -> Task<Message> {
    pick_file(step, i18n.tr(title_key), Vec::new())
}

fn pick_folder(step: FolderStep, title: String) -> Task<Message> {
    Task::perform(dialogs::pick_folder(title), move |path| {
        Message::FolderPicked(step, path)
    })
}

fn tool_button<'a>(label: String, message: Message) -> Element<'a, Message> {
    button(text(label).size(typography::BODY))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::primary)
        .on_press(message)
        .into()
}

fn section<'a>(label: String, buttons: Vec<Element<'a, Message>>) -> Element<'a, Message> {
    let label = container(text(label).size(typography::BODY))
        .width(Length::Fixed(sizing::SECTION_LABEL_WIDTH));
    let buttons = row(buttons).spacing(spacing::XS).wrap();
    row![label, buttons]
        .spacing(spacing::SM)
        .align_y(Alignment::Center)
        .into()
}
