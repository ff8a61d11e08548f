use crate::kernel::effect::PersistKey;
use crate::kernel::services::ports::Theme;
use crate::kernel::Effect;

use super::DispatchResult;

impl super::Store {
    pub(super) fn reduce_set_auto_detect(&mut self, enabled: bool) -> DispatchResult {
        if self.state.settings.auto_detect == enabled {
            return DispatchResult::unchanged();
        }
        self.state.settings.auto_detect = enabled;
        self.refresh_output();
        DispatchResult::changed(vec![Effect::Persist(PersistKey::UserSettings)])
    }

    pub(super) fn reduce_set_theme(&mut self, theme: Theme) -> DispatchResult {
        if self.state.settings.theme == theme {
            return DispatchResult::unchanged();
        }
        self.state.settings.theme = theme;
        DispatchResult::changed(vec![Effect::Persist(PersistKey::UserSettings)])
    }
}
