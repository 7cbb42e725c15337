// Script fixtures shared by integration tests

#![allow(dead_code)]

/// A short but complete episode: title block, content warnings, a scene,
/// actions, two speakers, a continuation, and the closing boilerplate
pub const EPISODE: &str = "The Night Watch \u{2013} Episode 4: Low Tide\n\n\
Written by A. Writer\n\n\
Starring JAMES and ROSE\n\n\n\n\
Content Warnings\n\n\
Strong language, mild peril.\n\n\n\n\
INT. LIGHTHOUSE - NIGHT\n\n\n\n\
[waves crash][wind howls]\n\n\n\n\
JAMES\n\n\
What the hell was that?\n\n\n\n\
ROSE (V.O.)\n\n\
Probably the damn generator.\n\n\
Again.\n\n\n\n\
It does this every night.\n\n\n\n\
JAMES\n\n\
Damn it. Damn it all.\n\n\n\n\
[door slams]\n\n\n\n\
The Night Watch is a podcast distributed by Tidewater Audio.\n\n\
Find us online.";

/// Dialogue only, no swearing
pub const CLEAN_EPISODE: &str = "Quiet Hours - Episode 1\n\n\n\n\
[kettle whistles]\n\n\n\n\
NELL\n\n\
Tea?\n\n\n\n\
OSCAR\n\n\
Please. Two sugars.\n\n\n\n\
Quiet Hours is a podcast distributed by Nobody.";

/// Speech before any speaker label
pub const ORPHAN_DIALOGUE: &str = "Orphans - Pilot\n\n\n\n\
[static]\n\n\n\n\
Who said that?";

/// One paragraph per line, no empty paragraphs
pub const NO_BLOCKS: &str = "Single Block - Episode 1\n\nJAMES\n\nHello.";

pub const LEXICON_FILE: &str = "# test lexicon\n\ndamn\nhell\n";
