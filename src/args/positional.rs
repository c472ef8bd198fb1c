use lexopt::ValueExt;

use recur::CalendarDate;

use crate::args::{Configurable, Usage, flags::FlexibleDate};

/// The optional `<start>` positional argument shared by every command.
#[derive(Clone, Debug, Default)]
pub struct Start(Option<FlexibleDate>);

impl Start {
    /// Returns the start date given, or today if none was given.
    pub fn get(&self) -> CalendarDate {
        self.0.unwrap_or_else(FlexibleDate::today).get()
    }
}

impl Configurable for Start {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        let lexopt::Arg::Value(ref v) = *arg else { return Ok(false) };
        if self.0.is_some() {
            return Ok(false);
        }
        self.0 = Some(v.clone().string()?.parse()?);
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[FlexibleDate::ARG_START]
    }
}
