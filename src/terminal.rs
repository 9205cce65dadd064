//! Line-oriented front end for the intake wizard and the contact form.
//!
//! Generic over the reader and writer so the same driver runs against
//! stdin/stdout in the binary and against in-memory buffers in tests.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines},
    sync::mpsc,
};

use crate::{
    analysis::{AnalysisOutcome, AnalysisPort, field_info_or_local},
    intake::{
        ConsentDecision, ConsentPrompt, ContactField, ContactForm, ContactOutcome,
        ContactSubmitter, ContactTopic, FormField, IntakeField, IntakeWizard, ProgressSequence,
        ProgressUpdate, ResultsEntry, SubmitOutcome, WizardStep,
    },
    routes::Route,
};

const CONSENT_NOTICE: [&str; 4] = [
    "TriageX does not provide a diagnosis. It offers level-of-care recommendations based on your input.",
    "If uncertain, TriageX always recommends the higher level of care.",
    "If your symptoms worsen or become severe, call emergency services (112) immediately.",
    "The tool supports, but does not replace, professional medical judgment.",
];

pub struct Terminal<R, W> {
    lines: Lines<R>,
    writer: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            lines: reader.lines(),
            writer,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Consent → input → processing → results, repeated while the user asks
    /// for a new assessment. Returns the route the session ends on.
    pub async fn run_assessment(
        &mut self,
        wizard: &mut IntakeWizard,
        port: &dyn AnalysisPort,
        sequence: &ProgressSequence,
    ) -> Result<Route> {
        let route = wizard
            .enter_input(self)
            .await
            .context("failed to read consent state")?;
        if route != Route::Input {
            self.say("Consent is required to start an assessment. Returning to the home page.")
                .await?;
            return Ok(route);
        }

        let mut pending = IntakeField::ALL.to_vec();
        loop {
            self.step_header(WizardStep::Input).await?;
            self.collect_intake(wizard, port, &pending).await?;

            match wizard.submit().context("failed to store intake payload")? {
                SubmitOutcome::Accepted => {}
                SubmitOutcome::Invalid => {
                    pending = wizard.form().errors().keys().copied().collect();
                    if pending.is_empty() {
                        pending.push(IntakeField::Symptom);
                    }
                    self.report_errors(wizard).await?;
                    continue;
                }
                SubmitOutcome::ConsentRequired => return Ok(Route::Home),
            }

            let next = self
                .ask("Press Enter to analyze, or type 'back' to change your answers: ")
                .await?;
            if next.trim().eq_ignore_ascii_case("back") {
                wizard.back();
                pending = self.choose_edits(wizard).await?;
                continue;
            }

            self.step_header(WizardStep::Processing).await?;
            let (updates_tx, updates_rx) = mpsc::unbounded_channel();
            let (entry, rendered) = tokio::join!(
                wizard.process(port, sequence, Some(updates_tx)),
                self.render_progress(sequence.stages(), updates_rx)
            );
            rendered?;

            match entry.context("failed to read intake payload")? {
                ResultsEntry::Rendered(outcome) => {
                    self.step_header(WizardStep::Results).await?;
                    self.render_outcome(&outcome).await?;
                }
                ResultsEntry::RedirectedTo(route) => {
                    self.say(&format!("No assessment in progress; back to {route}."))
                        .await?;
                    pending = IntakeField::ALL.to_vec();
                    continue;
                }
            }

            let again = self.ask("Start a new assessment? [y/N] ").await?;
            if !is_yes(&again) {
                return Ok(Route::Results);
            }
            wizard.restart().context("failed to clear intake payload")?;
            pending = IntakeField::ALL.to_vec();
        }
    }

    pub async fn run_contact(
        &mut self,
        form: &mut ContactForm,
        submitter: &dyn ContactSubmitter,
    ) -> Result<Route> {
        self.say("Speak with the TriageX team").await?;
        let mut pending = ContactField::ALL.to_vec();
        loop {
            for field in &pending {
                let answer = match field {
                    ContactField::PrimaryTopic => self.ask_topic().await?,
                    other => self.ask(&format!("{} *: ", other.label())).await?,
                };
                form.change(*field, answer);
            }

            match form.submit(submitter).await? {
                ContactOutcome::Submitted { redirect } => {
                    self.say("Thanks! A member of our team will reach out within one business day.")
                        .await?;
                    return Ok(redirect);
                }
                ContactOutcome::Invalid => {
                    for (field, message) in form.state().errors() {
                        self.say(&format!("  - {}: {message}", field.label())).await?;
                    }
                    pending = form.state().errors().keys().copied().collect();
                }
            }
        }
    }

    async fn collect_intake(
        &mut self,
        wizard: &mut IntakeWizard,
        port: &dyn AnalysisPort,
        fields: &[IntakeField],
    ) -> Result<()> {
        for field in fields {
            loop {
                let marker = if field.is_required() { " *" } else { "" };
                let answer = self
                    .ask(&format!("{}{marker} (? for help): ", field.label()))
                    .await?;
                if answer.trim() == "?" {
                    let info = field_info_or_local(port, *field).await;
                    self.say(&format!("{}: {}", info.title, info.description))
                        .await?;
                    continue;
                }
                wizard.form_mut().change(*field, answer);
                break;
            }
        }
        Ok(())
    }

    /// Lists the current answers and reads which ones to change, by number
    /// or by field key.
    async fn choose_edits(&mut self, wizard: &IntakeWizard) -> Result<Vec<IntakeField>> {
        self.say("Your answers:").await?;
        for (index, (field, value)) in wizard.form().values().enumerate() {
            let shown = if value.trim().is_empty() { "(blank)" } else { value };
            self.say(&format!("  {}. {}: {shown}", index + 1, field.label()))
                .await?;
        }

        let answer = self
            .ask("Fields to change (numbers or keys, separated by spaces): ")
            .await?;
        let mut chosen = Vec::new();
        for token in answer.split([' ', ',']).filter(|token| !token.is_empty()) {
            let field = token
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .and_then(|index| IntakeField::ALL.get(index).copied())
                .or_else(|| IntakeField::from_key(token));
            match field {
                Some(field) if !chosen.contains(&field) => chosen.push(field),
                Some(_) => {}
                None => self.say(&format!("Unknown field '{token}' ignored.")).await?,
            }
        }
        Ok(chosen)
    }

    async fn report_errors(&mut self, wizard: &IntakeWizard) -> Result<()> {
        self.say("Please correct the following:").await?;
        for (field, message) in wizard.form().errors() {
            self.say(&format!("  - {}: {message}", field.label())).await?;
        }
        Ok(())
    }

    async fn render_progress(
        &mut self,
        stages: &[String],
        mut updates: mpsc::UnboundedReceiver<ProgressUpdate>,
    ) -> Result<()> {
        let mut last_stage = None;
        while let Some(update) = updates.recv().await {
            if last_stage != Some(update.stage) || update.percent % 25 == 0 {
                let stage = stages.get(update.stage).map(String::as_str).unwrap_or_default();
                self.say(&format!("[{:>3}%] {stage}", update.percent)).await?;
                last_stage = Some(update.stage);
            }
        }
        Ok(())
    }

    async fn render_outcome(&mut self, outcome: &AnalysisOutcome) -> Result<()> {
        let result = &outcome.result;
        let level = result.level;
        self.say(&format!("{} {}", level.icon(), level.title())).await?;
        self.say(level.description()).await?;
        self.say(&format!("Confidence: {}%", result.confidence_percent()))
            .await?;
        self.say(&result.message).await?;
        if !result.recommendations.is_empty() {
            self.say("Recommendations:").await?;
            for (index, recommendation) in result.recommendations.iter().enumerate() {
                self.say(&format!("  {}. {recommendation}", index + 1)).await?;
            }
        }
        self.say(&format!("Safety note: {}", result.safety_note))
            .await
    }

    async fn ask_topic(&mut self) -> Result<String> {
        self.say("Primary topic:").await?;
        for (index, topic) in ContactTopic::ALL.iter().enumerate() {
            self.say(&format!("  {}. {}", index + 1, topic.label())).await?;
        }
        let answer = self.ask("Select a topic *: ").await?;
        let chosen = answer
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| ContactTopic::ALL.get(index))
            .map(|topic| topic.value().to_string());
        Ok(chosen.unwrap_or(answer))
    }

    async fn step_header(&mut self, step: WizardStep) -> Result<()> {
        let name = match step {
            WizardStep::Input => "Tell us how you feel",
            WizardStep::Processing => "Analyzing your input",
            WizardStep::Results => "Your recommendation",
        };
        self.say(&format!(
            "\nStep {} of {}: {name}",
            step.ordinal(),
            WizardStep::COUNT
        ))
        .await
    }

    async fn ask_consent(&mut self) -> Result<String> {
        self.say("Important to know:").await?;
        for line in CONSENT_NOTICE {
            self.say(&format!("  • {line}")).await?;
        }
        self.ask("I have read and understand the information above and consent to using TriageX [y/N]: ")
            .await
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn ask(&mut self, prompt: &str) -> Result<String> {
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;
        self.lines
            .next_line()
            .await?
            .ok_or_else(|| anyhow!("input closed"))
    }
}

#[async_trait]
impl<R, W> ConsentPrompt for Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn acknowledge(&mut self) -> ConsentDecision {
        match self.ask_consent().await {
            Ok(answer) if is_yes(&answer) => ConsentDecision::Accept,
            Ok(_) => ConsentDecision::Decline,
            Err(err) => {
                tracing::warn!(
                    target: "consent",
                    error = %err,
                    "consent_prompt_unreadable"
                );
                ConsentDecision::Decline
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
