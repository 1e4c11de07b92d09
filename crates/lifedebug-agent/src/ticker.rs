// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rotating flavour text shown while an analysis is in flight.

use rand::Rng;

pub const LOADING_QUOTES: &[&str] = &[
    "Judging your life choices...",
    "Trying to understand this mess...",
    "Consulting the Oracle of Order...",
    "Wait, I need my glasses for this...",
    "Buffering your reality...",
    "Is that a sock or a cat? Analyzing...",
    "Calculating the optimal path to happiness...",
    "Wait harder...",
    "If this takes long, blame the clutter...",
    "Loading 99%... just kidding...",
    "Converting chaos to JSON...",
    "Deep breathing initiated...",
    "Untangling your decisions... might take a minute.",
    "Hold on... deciphering human behavior is hard.",
    "Searching for common sense... not found.",
    "Calibrating emotional stability... low battery.",
    "Googling 'How to fix your life'...",
    "Crunching numbers you should've crunched earlier...",
    "Your mess is loading... please stand by.",
    "Trying not to judge... trying really hard...",
    "Optimizing your questionable choices...",
    "Patching your life with duct tape...",
    "Refactoring your chaos...",
    "Running fix_my_life.exe...",
    "Debugging your reality... found 42 bugs.",
    "Locating motivation... still searching...",
    "Breaking the laws of physics to help you...",
    "Loading your excuses...",
    "Scanning for solutions... found memes instead.",
    "Reading your mind... please think slower.",
    "Finding the root cause... root cause is you.",
    "Running emotional diagnostics... results unclear.",
    "Updating your common sense to version 2.0...",
    "Syncing with your past mistakes... this may take long.",
    "Sorting your priorities... they were upside down.",
    "Checking your vibe score... error 404.",
    "Organizing your chaos alphabetically...",
    "Trying to make sense of your schedule... failing.",
    "Downloading sanity... low bandwidth.",
    "Rebooting your life... please wait.",
    "Upgrading your mindset... progress: 0%.",
    "Translating your chaos to English...",
    "Resisting urge to scream internally...",
    "Trying to remain optimistic...",
    "Scanning for intelligent life...",
    "Plot twist detected... recalibrating.",
    "Your life is buffering... hold tight.",
    "Loading patience... this will take a while.",
    "Trying to be supportive...",
    "Compressing your emotional baggage...",
    "Sorting problems by size... all XL.",
    "Enabling 'Fix Everything' mode...",
    "Running away... kidding... maybe.",
    "Charging creativity... low power mode active.",
    "Reconstructing your shattered focus...",
    "Checking system integrity... questionable.",
    "Downloading motivation from the cloud...",
    "Aligning chakras... installing updates...",
    "Bringing order to your natural disaster...",
    "Trying to ignore the chaos... can't.",
    "Detecting procrastination... confirmed.",
    "Fixing what you broke... again.",
    "Scanning for signs of adulthood... none found.",
    "Consulting ancient wisdom... even they confused.",
    "Attempting to 'unmess' your mess...",
    "Generating solutions... at least one should work.",
    "Hunting dust bunnies...",
    "Staring at your problems... they stare back.",
    "Calculating how bad this really is...",
    "Asking the universe for help... voicemail.",
    "Trying to stay calm... deep breaths.",
    "Untangling the headphone wires of your life...",
    "Bringing structure to chaos... architect mode.",
    "Calling tech support... they hung up.",
    "Measuring disaster radius... it's wide.",
    "Manifesting clarity... slowly.",
    "Removing unnecessary stress... found too much.",
    "Collecting spare brain cells...",
    "Updating your reality drivers...",
    "Connecting loose wires in your plan...",
    "Balancing your timeline... unstable.",
    "Sweeping nonsense under the rug...",
    "Trying to understand your handwriting... nope.",
    "Stitching together your scattered thoughts...",
    "Testing your patience... please don't break.",
    "Reconstructing your to-do list... it's crying.",
    "Engaging logic mode... may malfunction.",
    "Transferring chaos to the recycle bin...",
    "Backing up your sanity...",
    "Folding your life neatly... finding wrinkles.",
    "Reading your aura... blurry.",
    "Your tasks are plotting against you... investigating.",
    "Attempting to find a good decision...",
    "Mental defragmentation in progress...",
    "Analyzing future mistakes...",
    "Adding 10% extra productivity...",
    "Resisting urge to judge your folder names...",
    "Inspecting your priorities... they need therapy.",
    "Checking for motivation leaks... found several.",
    "Preparing inspirational speech... loading.",
    "Searching for missing socks... and logic.",
    "Summoning focus... arriving soon.",
    "Checking your emotional RAM... overloaded.",
    "Attempting to optimize your vibe...",
    "Downloading brain update... failed.",
    "Balancing chaos-to-order ratio...",
    "Trying to stay positive... battery low.",
    "Reviewing your life patch notes...",
    "Tightening loose bolts in your routine...",
    "Casting spell of productivity... fizzled.",
    "Attempting to resurrect motivation...",
    "Stabilizing your timeline... please don't move.",
];

/// Cycles through [`LOADING_QUOTES`] from a random starting point.
#[derive(Debug, Clone)]
pub struct LoadingTicker {
    index: usize,
}

impl LoadingTicker {
    pub fn new() -> Self {
        Self::starting_at(rand::thread_rng().gen_range(0..LOADING_QUOTES.len()))
    }

    /// A ticker starting at a fixed quote (wrapped into range).
    pub fn starting_at(index: usize) -> Self {
        Self {
            index: index % LOADING_QUOTES.len(),
        }
    }

    pub fn current(&self) -> &'static str {
        LOADING_QUOTES[self.index]
    }

    /// Advances one quote and returns it.
    pub fn tick(&mut self) -> &'static str {
        self.index = (self.index + 1) % LOADING_QUOTES.len();
        self.current()
    }
}

impl Default for LoadingTicker {
    fn default() -> Self {
        Self::new()
    }
}
