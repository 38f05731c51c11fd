use crate::graph::{
    amplify::Amplify,
    node::{Processor, Source},
    through::Through,
};

pub trait SourceExt: Source + Sized {
    fn amplify<M: Source>(self, modulator: M) -> Amplify<Self, M> {
        Amplify::new(self, modulator)
    }

    fn through<P: Processor>(self, processor: P) -> Through<Self, P> {
        Through::new(self, processor)
    }
}

impl<T: Source> SourceExt for T {}

pub trait ProcessorExt: Processor + Sized {
    fn then<P: Processor>(self, next: P) -> Through<Self, P> {
        Through::new(self, next)
    }
}

impl<T: Processor> ProcessorExt for T {}
