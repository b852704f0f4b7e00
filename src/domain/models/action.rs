#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    LoadTopic(String),
    SubmitAnswer(usize),
    Advance(),
    Reset(),
}
