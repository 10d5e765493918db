pub mod crewtimer;
