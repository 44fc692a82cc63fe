/// Every deferred action on the page. One `Scheduler<PageTimer>` drives them
/// all from the animation-frame callback.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PageTimer {
    /// Recurring fluorescent point batch.
    GeneratePoints,
    /// Grace period after a drag before auto-rotation resumes.
    ResumeAutoRotate,
    /// Wheel input went quiet; navigate in the accumulated direction.
    WheelSettle,
    AiInput(AiInputTimer),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AiInputTimer {
    /// Next step of the auto-type sequence.
    AutoType,
    /// End of a manual submission's loading state.
    SubmitDone,
    /// Next phase of the auto-animate loop.
    Animate,
}
