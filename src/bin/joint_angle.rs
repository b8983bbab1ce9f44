use clap::Parser;
use motionkit::pose::{JointKeypoints, Point2};

#[derive(Parser, Debug)]
#[command(name = "joint_angle")]
#[command(about = "Compute the elbow flexion angle from shoulder, elbow and wrist keypoints")]
struct Args {
    /// Shoulder position as "x,y"
    #[arg(long, allow_hyphen_values = true)]
    shoulder: Point2,

    /// Elbow position as "x,y"
    #[arg(long, allow_hyphen_values = true)]
    elbow: Point2,

    /// Wrist position as "x,y"
    #[arg(long, allow_hyphen_values = true)]
    wrist: Point2,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let joints = JointKeypoints::new(args.shoulder, args.elbow, args.wrist);
    log::debug!(
        "shoulder {} elbow {} wrist {}",
        joints.shoulder,
        joints.elbow,
        joints.wrist
    );
    println!("Elbow angle: {:.2}°", joints.elbow_angle());
}
