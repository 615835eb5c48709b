pub mod conversation_state;
pub mod dispatcher;
pub mod parse;
pub mod prompt;
pub mod prompt_store;
pub mod recommend;

use std::io::Write;
use std::process::ExitCode;

use color_print::cformat;
use conversation_state::ConversationState;
use dispatcher::Dispatcher;
use eyre::Result;
use prompt::generate_prompt;
use prompt_store::{PromptStore, DEFAULT_SYSTEM_PROMPT};
use tracing::error;

use crate::error::RecommendError;

const WELCOME_TEXT: &str = "
👋 안녕하세요! 🏔️ 히말라야 트래킹 코스 추천 봇입니다.

기간과 난이도를 알려주시면 맞춤형 트래킹 코스를 추천해 드릴게요.

예시: \"6-8일 보통 난이도\"

/help         도움말 보기
/quit         종료
";

const HELP_TEXT: &str = "
히말라야 트래킹 추천 챗봇

/clear               대화 내역 초기화 (프롬프트는 유지)
/prompt              현재 시스템 프롬프트 확인
/prompt set <내용>    시스템 프롬프트 저장
/prompt reset        기본 프롬프트로 리셋
/help                이 도움말 보기
/quit                종료
";

pub struct ChatContext {
    output: Box<dyn Write>,
    input: Option<String>,
    interactive: bool,
    conversation: ConversationState,
    prompt_store: PromptStore,
    dispatcher: Dispatcher,
}

impl ChatContext {
    pub fn new(
        output: Box<dyn Write>,
        input: Option<String>,
        interactive: bool,
        dispatcher: Dispatcher,
    ) -> Self {
        let prompt_store = PromptStore::new();
        let conversation = ConversationState::new(prompt_store.effective_prompt());
        Self {
            output,
            input,
            interactive,
            conversation,
            prompt_store,
            dispatcher,
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        if self.interactive {
            self.print_welcome()?;
        }

        // Handle non-interactive mode (single query)
        if let Some(input) = self.input.take() {
            self.handle_input(&input).await?;
            return Ok(ExitCode::SUCCESS);
        }

        // Interactive mode
        if self.interactive {
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME_TEXT)?;
        writeln!(
            self.output,
            "{}",
            cformat!("<yellow>{}</yellow>", self.dispatcher.mode_badge())
        )?;
        writeln!(self.output)?;
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let prompt_text = generate_prompt(None);
            let readline = rl.readline(&prompt_text);

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if line.trim() == "/quit" {
                        break;
                    }

                    if let Err(e) = self.handle_input(&line).await {
                        error!("input handling failed: {e}");
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_input(&mut self, input: &str) -> Result<()> {
        let trimmed = input.trim();
        match trimmed {
            "/help" => {
                writeln!(self.output, "{}", HELP_TEXT)?;
            }
            "/clear" => {
                // turns are discarded, the effective prompt is kept
                self.conversation.reset(self.prompt_store.effective_prompt());
                writeln!(self.output, "✅ 대화가 초기화되었습니다.")?;
            }
            "/prompt" => {
                self.show_prompt()?;
            }
            "/prompt reset" => {
                self.prompt_store.clear()?;
                self.conversation.set_system_prompt(DEFAULT_SYSTEM_PROMPT)?;
                writeln!(self.output, "✅ 기본 프롬프트로 리셋되었습니다.")?;
            }
            "/prompt set" => {
                // bare form: nothing to save
                self.update_system_prompt("")?;
            }
            _ => {
                if let Some(rest) = trimmed.strip_prefix("/prompt set ") {
                    self.update_system_prompt(rest)?;
                } else if trimmed.starts_with('/') {
                    writeln!(self.output, "알 수 없는 명령입니다. /help 를 참고하세요.")?;
                } else {
                    self.process_chat_input(trimmed).await?;
                }
            }
        }

        Ok(())
    }

    fn show_prompt(&mut self) -> Result<()> {
        let origin = if self.prompt_store.is_customized() {
            "사용자 지정 프롬프트"
        } else {
            "기본 프롬프트"
        };
        writeln!(self.output, "[{}]\n{}", origin, self.conversation.system_prompt())?;
        Ok(())
    }

    fn update_system_prompt(&mut self, raw: &str) -> Result<()> {
        let prompt = raw.trim();
        if prompt.is_empty() {
            writeln!(
                self.output,
                "{}",
                cformat!("<red>❌ 프롬프트를 입력해주세요.</red>")
            )?;
            return Ok(());
        }

        self.conversation.set_system_prompt(prompt)?;
        self.prompt_store.save(prompt)?;
        writeln!(
            self.output,
            "✅ 프롬프트가 저장되었습니다. 다음 대화부터 새로운 프롬프트가 적용됩니다."
        )?;
        Ok(())
    }

    async fn process_chat_input(&mut self, query: &str) -> Result<()> {
        // the user turn goes in before the request is issued, so the remote
        // path sees it as part of the history
        if let Err(err) = self.conversation.add_user_message(query) {
            self.print_error_bubble(&err)?;
            return Ok(());
        }

        match self.dispatcher.recommend(&self.conversation, query).await {
            Ok(answer) => {
                writeln!(self.output, "{}\n", answer)?;
                self.conversation.add_assistant_message(&answer)?;
            }
            Err(err) => {
                // shown once, kept out of the durable history
                error!("recommendation failed: {err}");
                self.print_error_bubble(&err)?;
            }
        }

        Ok(())
    }

    fn print_error_bubble(&mut self, err: &RecommendError) -> Result<()> {
        writeln!(
            self.output,
            "{}\n",
            cformat!(
                "<red>❌ 오류: {}</red>\n\n다시 시도해주시거나 다른 질문을 해주세요.",
                err
            )
        )?;
        Ok(())
    }
}
