use std::fs;
use std::io;
use std::path::PathBuf;

use eyre::Result;
use tracing::debug;

/// Built-in advisor instruction, used whenever no custom prompt is saved.
pub const DEFAULT_SYSTEM_PROMPT: &str = concat!(
    "당신은 히말라야 트래킹 전문 여행 플래너입니다. ",
    "사용자가 기간(일수)과 난이도(쉬움/보통/어려움)를 말하면, ",
    "네팔/티베트/인도 히말라야의 대표 코스를 2~3개 추천하세요. ",
    "각 코스에 대해: ",
    "- 예상 소요기간(이동/적응일 포함 범위) ",
    "- 난이도(쉬움/보통/어려움)와 고도 적응 이슈 ",
    "- 핵심 하이라이트(뷰포인트/마을/호수 등) ",
    "- 최적 시즌, 퍼밋/가이드 필요 여부 ",
    "간결한 bullet로 한국어로 답하고, 적절한 이모티콘(🏔️, ⏱️, ⛰️, ✨, 📅, 🎫 등)을 사용하여 가독성을 높이세요. ",
    "필요 시 대안/단축 코스도 제안하세요. ",
    "예시 코스: 푼힐, 랑탕, 마르디 히말, 안나푸르나 서킷, 에베레스트 베이스캠프, 고쿄 호수, 마나슬루, 어퍼 무스탕, 칸첸중가 등."
);

const PROMPT_FILE: &str = "system_prompt.txt";

/// Single-slot store for a customized system prompt, kept as a plain-text
/// file under the per-user config directory. An absent or blank file means
/// "use the built-in default".
pub struct PromptStore {
    dir: PathBuf,
}

impl PromptStore {
    pub fn new() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trek-chat");
        Self { dir }
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(PROMPT_FILE)
    }

    /// The saved custom prompt, if any.
    pub fn load(&self) -> Option<String> {
        let text = fs::read_to_string(self.path()).ok()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Saved prompt if present, otherwise the built-in default.
    pub fn effective_prompt(&self) -> String {
        self.load()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string())
    }

    pub fn is_customized(&self) -> bool {
        self.load().is_some()
    }

    pub fn save(&self, prompt: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(), prompt.trim())?;
        debug!("saved system prompt to {}", self.path().display());
        Ok(())
    }

    /// Drops the custom prompt. Removing a prompt that was never saved is
    /// not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for PromptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_when_nothing_saved() {
        let dir = tempdir().unwrap();
        let store = PromptStore::with_dir(dir.path().to_path_buf());
        assert_eq!(store.load(), None);
        assert!(!store.is_customized());
        assert_eq!(store.effective_prompt(), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = PromptStore::with_dir(dir.path().to_path_buf());
        store.save("  당신은 셰르파입니다.  ").unwrap();
        assert_eq!(store.load().as_deref(), Some("당신은 셰르파입니다."));
        assert!(store.is_customized());
        assert_eq!(store.effective_prompt(), "당신은 셰르파입니다.");
    }

    #[test]
    fn clear_restores_the_default() {
        let dir = tempdir().unwrap();
        let store = PromptStore::with_dir(dir.path().to_path_buf());
        store.save("custom").unwrap();
        store.clear().unwrap();
        assert_eq!(store.effective_prompt(), DEFAULT_SYSTEM_PROMPT);
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn blank_file_counts_as_unset() {
        let dir = tempdir().unwrap();
        let store = PromptStore::with_dir(dir.path().to_path_buf());
        store.save("   ").unwrap();
        assert_eq!(store.load(), None);
        assert_eq!(store.effective_prompt(), DEFAULT_SYSTEM_PROMPT);
    }
}
