use crate::core::commands::Flow;

pub(crate) trait CommandHandler {
    fn handle_line(&mut self, line: &str) -> Flow;
}

impl CommandHandler for super::Shell {
    fn handle_line(&mut self, line: &str) -> Flow {
        let before = self.executor.state().current_dir().to_path_buf();
        let flow = self.executor.execute(line, &mut self.presenter);

        // Keep path completion anchored where the next command resolves paths.
        let after = self.executor.state().current_dir();
        if after != before {
            if let Some(helper) = self.editor.helper_mut() {
                helper.set_base_dir(after.to_path_buf());
            }
        }

        flow
    }
}
