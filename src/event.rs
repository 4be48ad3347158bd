use crate::error::AppError;
use crate::state::response_state::ResponseState;
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Response(Result<ResponseState, AppError>),
    Resize(u16, u16),
}
